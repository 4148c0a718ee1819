//! Device constraints.
//!
//! A [`Device`] attached to a [`Circuit`](crate::Circuit) vets every
//! operation before it is placed. [`GridDevice`] models a planar chip: a
//! set of grid qubits, a coupling graph and the gate families it can run.

use petgraph::graph::{NodeIndex, UnGraph};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;

use crate::error::DeviceError;
use crate::gate::{Gate, GateFamily};
use crate::moment::Moment;
use crate::operation::Operation;
use crate::qubit::{GridQubit, Qubit};

/// Hardware constraints a circuit must satisfy.
pub trait Device: fmt::Debug + fmt::Display + Send + Sync {
    /// Get the device name.
    fn name(&self) -> &str;

    /// The qubits on the device, sorted. Empty means any qubit is allowed.
    fn qubits(&self) -> Vec<Qubit>;

    /// Check a single operation.
    fn validate_operation(&self, op: &Operation) -> Result<(), DeviceError>;

    /// Check a whole moment.
    fn validate_moment(&self, moment: &Moment) -> Result<(), DeviceError> {
        moment
            .operations()
            .iter()
            .try_for_each(|op| self.validate_operation(op))
    }
}

/// A device that accepts every operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconstrainedDevice;

impl Device for UnconstrainedDevice {
    fn name(&self) -> &str {
        "unconstrained"
    }

    fn qubits(&self) -> Vec<Qubit> {
        vec![]
    }

    fn validate_operation(&self, _op: &Operation) -> Result<(), DeviceError> {
        Ok(())
    }
}

impl fmt::Display for UnconstrainedDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UnconstrainedDevice")
    }
}

/// A planar device of grid qubits with nearest-neighbour couplings.
///
/// All couplings are bidirectional.
#[derive(Debug, Clone)]
pub struct GridDevice {
    name: String,
    graph: UnGraph<GridQubit, ()>,
    nodes: FxHashMap<GridQubit, NodeIndex>,
    /// Supported gate families; `None` accepts every family.
    gate_set: Option<FxHashSet<GateFamily>>,
}

impl GridDevice {
    /// Create a device from qubits, coupling every adjacent pair.
    pub fn new(name: impl Into<String>, qubits: impl IntoIterator<Item = GridQubit>) -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut nodes = FxHashMap::default();
        for q in qubits {
            nodes.entry(q).or_insert_with(|| graph.add_node(q));
        }

        let mut sorted: Vec<_> = nodes.keys().copied().collect();
        sorted.sort();
        for (i, a) in sorted.iter().enumerate() {
            for b in &sorted[i + 1..] {
                if a.is_adjacent(b) {
                    graph.add_edge(nodes[a], nodes[b], ());
                }
            }
        }

        Self {
            name: name.into(),
            graph,
            nodes,
            gate_set: None,
        }
    }

    /// A `rows x cols` rectangle accepting every gate family.
    pub fn rect(rows: i32, cols: i32) -> Self {
        Self::new(format!("grid_{rows}x{cols}"), GridQubit::rect(rows, cols))
    }

    /// The 2x11 Foxtail chip.
    ///
    /// Supports X/Y/Z powers, CZ powers and measurement.
    pub fn foxtail() -> Self {
        Self::new("foxtail", GridQubit::rect(2, 11)).with_gate_set([
            GateFamily::X,
            GateFamily::Y,
            GateFamily::Z,
            GateFamily::CZ,
        ])
    }

    /// Restrict the device to the given gate families. Measurement is always allowed.
    #[must_use]
    pub fn with_gate_set(mut self, families: impl IntoIterator<Item = GateFamily>) -> Self {
        self.gate_set = Some(families.into_iter().collect());
        self
    }

    /// Number of qubits on the device.
    pub fn num_qubits(&self) -> usize {
        self.nodes.len()
    }

    /// Number of couplings.
    pub fn num_couplings(&self) -> usize {
        self.graph.edge_count()
    }

    /// Check whether the device has this qubit.
    pub fn contains(&self, qubit: &GridQubit) -> bool {
        self.nodes.contains_key(qubit)
    }

    /// Check whether two qubits are coupled.
    pub fn is_coupled(&self, a: &GridQubit, b: &GridQubit) -> bool {
        match (self.nodes.get(a), self.nodes.get(b)) {
            (Some(&na), Some(&nb)) => self.graph.find_edge(na, nb).is_some(),
            _ => false,
        }
    }

    /// Check whether the device can run this gate family.
    pub fn supports(&self, family: GateFamily) -> bool {
        self.gate_set
            .as_ref()
            .is_none_or(|set| set.contains(&family))
    }

    fn grid_qubits(&self, op: &Operation) -> Result<Vec<GridQubit>, DeviceError> {
        op.qubits()
            .iter()
            .map(|q| match q.as_grid() {
                Some(g) if self.contains(&g) => Ok(g),
                _ => Err(DeviceError::QubitNotOnDevice { qubit: q.clone() }),
            })
            .collect()
    }
}

impl Device for GridDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn qubits(&self) -> Vec<Qubit> {
        let mut qubits: Vec<_> = self.nodes.keys().map(|&q| Qubit::Grid(q)).collect();
        qubits.sort();
        qubits
    }

    fn validate_operation(&self, op: &Operation) -> Result<(), DeviceError> {
        let qubits = self.grid_qubits(op)?;

        let Gate::Pow { family, .. } = op.gate() else {
            return Ok(());
        };
        if !self.supports(*family) {
            return Err(DeviceError::UnsupportedGate {
                operation: op.to_string(),
            });
        }

        match qubits.as_slice() {
            [a, b] if !self.is_coupled(a, b) => Err(DeviceError::NonLocalInteraction {
                operation: op.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for GridDevice {
    /// Draws the chip as a grid of labels joined by coupling lines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nodes.is_empty() {
            return Ok(());
        }
        let mut rows: Vec<i32> = self.nodes.keys().map(|q| q.row).collect();
        rows.sort_unstable();
        rows.dedup();
        let min_col = self.nodes.keys().map(|q| q.col).min().unwrap_or(0);
        let max_col = self.nodes.keys().map(|q| q.col).max().unwrap_or(0);
        let cols: Vec<i32> = (min_col..=max_col).collect();

        let label = |row: i32, col: i32| {
            let q = GridQubit::new(row, col);
            if self.contains(&q) {
                q.to_string()
            } else {
                String::new()
            }
        };
        let widths: Vec<usize> = cols
            .iter()
            .map(|&c| {
                rows.iter()
                    .map(|&r| label(r, c).chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut lines = Vec::new();
        for (ri, &r) in rows.iter().enumerate() {
            let mut line = String::new();
            for (ci, &c) in cols.iter().enumerate() {
                let here = GridQubit::new(r, c);
                let right = GridQubit::new(r, c + 1);
                let fill = if self.is_coupled(&here, &right) {
                    '─'
                } else {
                    ' '
                };
                let text = label(r, c);
                line.push_str(&text);
                let pad = widths[ci] - text.chars().count();
                line.extend(std::iter::repeat_n(fill, pad));
                if ci + 1 < cols.len() {
                    line.extend(std::iter::repeat_n(fill, 3));
                }
            }
            lines.push(line.trim_end().to_string());

            if let Some(&next) = rows.get(ri + 1) {
                let mut spacer = String::new();
                for (ci, &c) in cols.iter().enumerate() {
                    let coupled =
                        self.is_coupled(&GridQubit::new(r, c), &GridQubit::new(next, c));
                    spacer.push(if coupled { '│' } else { ' ' });
                    spacer.extend(std::iter::repeat_n(' ', widths[ci] + 2));
                }
                let spacer = spacer.trim_end().to_string();
                lines.push(spacer.clone());
                lines.push(spacer);
            }
        }
        write!(f, "{}", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{cnot, cz, h, measure};

    #[test]
    fn test_foxtail_shape() {
        let dev = GridDevice::foxtail();
        assert_eq!(dev.num_qubits(), 22);
        // 2 rows x 10 horizontal + 11 vertical couplings
        assert_eq!(dev.num_couplings(), 31);
        assert_eq!(dev.qubits()[0], Qubit::grid(0, 0));
    }

    #[test]
    fn test_adjacent_cz_allowed() {
        let dev = GridDevice::foxtail();
        let op = cz(GridQubit::new(0, 0), GridQubit::new(0, 1)).unwrap();
        assert!(dev.validate_operation(&op).is_ok());
        let op = cz(GridQubit::new(0, 3), GridQubit::new(1, 3)).unwrap();
        assert!(dev.validate_operation(&op).is_ok());
    }

    #[test]
    fn test_nonlocal_cz_rejected() {
        let dev = GridDevice::foxtail();
        let op = cz(GridQubit::new(0, 0), GridQubit::new(0, 2)).unwrap();
        let err = dev.validate_operation(&op).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Non-local interaction: CZ((0, 0), (0, 2))."
        );
    }

    #[test]
    fn test_qubit_off_device() {
        let dev = GridDevice::foxtail();
        let op = cz(GridQubit::new(2, 0), GridQubit::new(1, 0)).unwrap();
        assert!(matches!(
            dev.validate_operation(&op),
            Err(DeviceError::QubitNotOnDevice { .. })
        ));
        let op = h(crate::qubit::LineQubit(0));
        assert!(matches!(
            dev.validate_operation(&op),
            Err(DeviceError::QubitNotOnDevice { .. })
        ));
    }

    #[test]
    fn test_gate_set() {
        let dev = GridDevice::foxtail();
        let op = cnot(GridQubit::new(0, 0), GridQubit::new(0, 1)).unwrap();
        assert!(matches!(
            dev.validate_operation(&op),
            Err(DeviceError::UnsupportedGate { .. })
        ));

        let permissive = GridDevice::rect(2, 2);
        assert!(permissive.validate_operation(&op).is_ok());
    }

    #[test]
    fn test_measurement_allowed_anywhere_on_device() {
        let dev = GridDevice::foxtail();
        let op = measure([GridQubit::new(0, 0), GridQubit::new(1, 5)], Some("m")).unwrap();
        assert!(dev.validate_operation(&op).is_ok());
    }

    #[test]
    fn test_unconstrained_accepts_everything() {
        let op = cz(GridQubit::new(0, 0), GridQubit::new(5, 5)).unwrap();
        assert!(UnconstrainedDevice.validate_operation(&op).is_ok());
    }

    #[test]
    fn test_small_grid_drawing() {
        let dev = GridDevice::rect(2, 2);
        let expected = "(0, 0)───(0, 1)\n│        │\n│        │\n(1, 0)───(1, 1)";
        assert_eq!(dev.to_string(), expected);
    }

    #[test]
    fn test_foxtail_drawing() {
        let drawing = GridDevice::foxtail().to_string();
        let lines: Vec<_> = drawing.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("(0, 0)───(0, 1)───(0, 2)"));
        assert!(lines[0].ends_with("(0, 9)───(0, 10)"));
        assert!(lines[1].starts_with("│        │        │"));
        assert!(lines[3].ends_with("(1, 9)───(1, 10)"));
    }
}
