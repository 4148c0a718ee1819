//! High-level circuit builder API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::device::Device;
use crate::diagram;
use crate::error::{IrError, IrResult};
use crate::operation::{Operation, cnot, h};
use crate::moment::Moment;
use crate::qubit::{LineQubit, Qubit};

/// How appended operations are packed into moments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InsertStrategy {
    /// Slide each operation back to the moment right after the last one
    /// that touches its qubits.
    #[default]
    Earliest,
    /// Every operation starts a new moment.
    New,
    /// Add to the last moment when it has room, otherwise start a new one.
    Inline,
    /// The first operation starts a new moment, the rest are inlined.
    NewThenInline,
}

/// A quantum circuit: an ordered sequence of moments.
///
/// A circuit may carry a [`Device`]. Every operation is then validated
/// against it before anything is placed, so a rejected append leaves the
/// circuit untouched.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    /// Time slices in order.
    moments: Vec<Moment>,
    /// Optional hardware constraints.
    device: Option<Arc<dyn Device>>,
}

impl Circuit {
    /// Create a new empty, unconstrained circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty circuit constrained by `device`.
    pub fn with_device(device: impl Device + 'static) -> Self {
        Self::with_shared_device(Arc::new(device))
    }

    /// Create an empty circuit constrained by a shared device.
    pub fn with_shared_device(device: Arc<dyn Device>) -> Self {
        Self {
            moments: vec![],
            device: Some(device),
        }
    }

    /// Build a circuit from operations using [`InsertStrategy::Earliest`].
    pub fn from_ops(ops: impl IntoIterator<Item = Operation>) -> IrResult<Self> {
        let mut circuit = Self::new();
        circuit.append(ops, InsertStrategy::Earliest)?;
        Ok(circuit)
    }

    /// Build a circuit with exactly the given moments.
    pub fn from_moments(moments: impl IntoIterator<Item = Moment>) -> IrResult<Self> {
        let mut circuit = Self::new();
        for moment in moments {
            circuit.append_moment(moment)?;
        }
        Ok(circuit)
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Append one operation with [`InsertStrategy::Earliest`].
    pub fn push(&mut self, op: Operation) -> IrResult<&mut Self> {
        self.append([op], InsertStrategy::Earliest)
    }

    /// Append operations using the given packing strategy.
    pub fn append(
        &mut self,
        ops: impl IntoIterator<Item = Operation>,
        strategy: InsertStrategy,
    ) -> IrResult<&mut Self> {
        let ops: Vec<Operation> = ops.into_iter().collect();
        self.validate_ops(&ops)?;

        for (i, op) in ops.into_iter().enumerate() {
            let index = match strategy {
                InsertStrategy::Earliest => self.earliest_index(&op),
                InsertStrategy::New => self.moments.len(),
                InsertStrategy::NewThenInline if i == 0 => self.moments.len(),
                InsertStrategy::Inline | InsertStrategy::NewThenInline => self.inline_index(&op),
            };
            debug!(operation = %op, moment = index, ?strategy, "placing operation");
            if index == self.moments.len() {
                self.moments.push(Moment::empty());
            }
            self.moments[index].push(op)?;
        }
        Ok(self)
    }

    /// Append a whole moment as a new time slice.
    pub fn append_moment(&mut self, moment: Moment) -> IrResult<&mut Self> {
        if let Some(device) = &self.device {
            device.validate_moment(&moment)?;
        }
        self.check_measurement_keys(moment.operations())?;
        debug!(index = self.moments.len(), ops = moment.len(), "appending moment");
        self.moments.push(moment);
        Ok(self)
    }

    fn validate_ops(&self, ops: &[Operation]) -> IrResult<()> {
        if let Some(device) = &self.device {
            for op in ops {
                device.validate_operation(op)?;
            }
        }
        self.check_measurement_keys(ops)
    }

    fn check_measurement_keys(&self, ops: &[Operation]) -> IrResult<()> {
        let mut batch = BTreeSet::new();
        for key in ops.iter().filter_map(Operation::measurement_key) {
            let taken = self.moments.iter().any(|m| m.uses_measurement_key(key));
            if taken || !batch.insert(key) {
                return Err(IrError::DuplicateMeasurementKey(key.to_string()));
            }
        }
        Ok(())
    }

    /// Index of the moment right after the last one touching `op`'s qubits.
    fn earliest_index(&self, op: &Operation) -> usize {
        self.moments
            .iter()
            .rposition(|m| m.operates_on(op.qubits()))
            .map_or(0, |i| i + 1)
    }

    fn inline_index(&self, op: &Operation) -> usize {
        match self.moments.last() {
            Some(last) if !last.operates_on(op.qubits()) => self.moments.len() - 1,
            _ => self.moments.len(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the moments.
    pub fn moments(&self) -> &[Moment] {
        &self.moments
    }

    /// Get the circuit depth (number of moments).
    pub fn depth(&self) -> usize {
        self.moments.len()
    }

    /// Get the total number of operations.
    pub fn num_operations(&self) -> usize {
        self.moments.iter().map(Moment::len).sum()
    }

    /// Check if the circuit has no operations.
    pub fn is_empty(&self) -> bool {
        self.moments.iter().all(Moment::is_empty)
    }

    /// Iterate over all operations, moment by moment.
    pub fn all_operations(&self) -> impl Iterator<Item = &Operation> {
        self.moments.iter().flat_map(|m| m.operations())
    }

    /// All qubits used by the circuit, sorted.
    pub fn all_qubits(&self) -> Vec<Qubit> {
        let set: BTreeSet<&Qubit> = self.moments.iter().flat_map(Moment::qubits).collect();
        set.into_iter().cloned().collect()
    }

    /// Measurement keys in circuit order.
    pub fn measurement_keys(&self) -> Vec<&str> {
        self.all_operations()
            .filter_map(Operation::measurement_key)
            .collect()
    }

    /// Check if the circuit contains a measurement.
    pub fn has_measurements(&self) -> bool {
        self.all_operations().any(Operation::is_measurement)
    }

    /// Check that no operation follows a measurement on the same qubits.
    pub fn are_all_measurements_terminal(&self) -> bool {
        self.moments.iter().enumerate().all(|(i, moment)| {
            moment
                .operations()
                .iter()
                .filter(|op| op.is_measurement())
                .all(|op| {
                    !self.moments[i + 1..]
                        .iter()
                        .any(|later| later.operates_on(op.qubits()))
                })
        })
    }

    /// Get the device, if any.
    pub fn device(&self) -> Option<&dyn Device> {
        self.device.as_deref()
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Bell state preparation on line qubits 0 and 1, without measurement.
    pub fn bell() -> IrResult<Self> {
        let q = LineQubit::range(2);
        Self::from_ops([h(q[0]), cnot(q[0], q[1])?])
    }

    /// GHZ state preparation on `n` line qubits, without measurement.
    pub fn ghz(n: i32) -> IrResult<Self> {
        if n < 0 {
            return Err(IrError::InvalidArgument(format!(
                "GHZ state needs a non-negative qubit count, got {n}"
            )));
        }
        let mut circuit = Self::new();
        if n == 0 {
            return Ok(circuit);
        }
        circuit.push(h(LineQubit(0)))?;
        for i in 0..n - 1 {
            circuit.push(cnot(LineQubit(i), LineQubit(i + 1))?)?;
        }
        Ok(circuit)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&diagram::render(self))
    }
}
