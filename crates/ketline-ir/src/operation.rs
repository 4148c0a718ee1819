//! Operations: gates bound to qubits.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::qubit::Qubit;

/// A gate applied to an ordered list of qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOperation")]
pub struct Operation {
    /// The gate.
    gate: Gate,
    /// Qubits in operand order.
    qubits: Vec<Qubit>,
}

/// Wire form of [`Operation`], checked by [`Operation::new`] on the way in.
#[derive(Deserialize)]
struct RawOperation {
    gate: Gate,
    qubits: Vec<Qubit>,
}

impl TryFrom<RawOperation> for Operation {
    type Error = IrError;

    fn try_from(raw: RawOperation) -> IrResult<Self> {
        Operation::new(raw.gate, raw.qubits)
    }
}

impl Operation {
    /// Create an operation, checking arity and qubit uniqueness.
    ///
    /// Measurements without an explicit key get the default key: the
    /// comma-joined display of their qubits.
    pub fn new(gate: Gate, qubits: Vec<Qubit>) -> IrResult<Self> {
        let expected = gate.num_qubits();
        match expected {
            Some(n) if n != qubits.len() => {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().into(),
                    expected: n,
                    got: qubits.len(),
                });
            }
            None if qubits.is_empty() => {
                return Err(IrError::InvalidArgument(
                    "measurement requires at least one qubit".into(),
                ));
            }
            _ => {}
        }

        let mut seen = HashSet::with_capacity(qubits.len());
        for q in &qubits {
            if !seen.insert(q) {
                return Err(IrError::DuplicateQubit {
                    qubit: q.clone(),
                    gate_name: gate.name().into(),
                });
            }
        }

        let gate = match gate {
            Gate::Measure { key: None } => Gate::Measure {
                key: Some(default_measurement_key(&qubits)),
            },
            other => other,
        };

        Ok(Self { gate, qubits })
    }

    /// Get the gate.
    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    /// Get the qubits in operand order.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Check if this operation touches any of the given qubits.
    pub fn touches(&self, qubits: &[Qubit]) -> bool {
        self.qubits.iter().any(|q| qubits.contains(q))
    }

    /// Check if this is a measurement.
    pub fn is_measurement(&self) -> bool {
        self.gate.is_measurement()
    }

    /// The measurement key, if this is a measurement.
    pub fn measurement_key(&self) -> Option<&str> {
        match &self.gate {
            Gate::Measure { key } => key.as_deref(),
            Gate::Pow { .. } => None,
        }
    }

    /// Per-wire diagram symbols, in operand order.
    pub fn wire_symbols(&self) -> Vec<String> {
        self.gate.wire_symbols(self.qubits.len())
    }
}

fn default_measurement_key(qubits: &[Qubit]) -> String {
    qubits
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let qubits = self
            .qubits
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        match &self.gate {
            Gate::Measure { key: Some(key) } => write!(f, "measure({qubits}, key='{key}')"),
            gate => write!(f, "{gate}({qubits})"),
        }
    }
}

// =========================================================================
// Constructors
// =========================================================================

/// `X` on a qubit.
pub fn x(q: impl Into<Qubit>) -> Operation {
    single(Gate::X, q)
}

/// `Y` on a qubit.
pub fn y(q: impl Into<Qubit>) -> Operation {
    single(Gate::Y, q)
}

/// `Z` on a qubit.
pub fn z(q: impl Into<Qubit>) -> Operation {
    single(Gate::Z, q)
}

/// Hadamard on a qubit.
pub fn h(q: impl Into<Qubit>) -> Operation {
    single(Gate::H, q)
}

fn single(gate: Gate, q: impl Into<Qubit>) -> Operation {
    Operation {
        gate,
        qubits: vec![q.into()],
    }
}

/// CNOT with `control` and `target`.
pub fn cnot(control: impl Into<Qubit>, target: impl Into<Qubit>) -> IrResult<Operation> {
    Operation::new(Gate::CNOT, vec![control.into(), target.into()])
}

/// CZ between two qubits.
pub fn cz(a: impl Into<Qubit>, b: impl Into<Qubit>) -> IrResult<Operation> {
    Operation::new(Gate::CZ, vec![a.into(), b.into()])
}

/// SWAP between two qubits.
pub fn swap(a: impl Into<Qubit>, b: impl Into<Qubit>) -> IrResult<Operation> {
    Operation::new(Gate::SWAP, vec![a.into(), b.into()])
}

/// iSWAP between two qubits.
pub fn iswap(a: impl Into<Qubit>, b: impl Into<Qubit>) -> IrResult<Operation> {
    Operation::new(Gate::ISWAP, vec![a.into(), b.into()])
}

/// Measure qubits under `key`, or the default key when `None`.
pub fn measure<I, Q>(qubits: I, key: Option<&str>) -> IrResult<Operation>
where
    I: IntoIterator<Item = Q>,
    Q: Into<Qubit>,
{
    Gate::measure(key.map(str::to_string)).on(qubits)
}
