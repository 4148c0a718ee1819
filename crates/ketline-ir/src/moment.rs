//! Moments: time slices of operations on disjoint qubits.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::operation::Operation;
use crate::qubit::Qubit;

/// A set of operations that act on pairwise-disjoint qubits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMoment")]
pub struct Moment {
    operations: Vec<Operation>,
}

#[derive(Deserialize)]
struct RawMoment {
    operations: Vec<Operation>,
}

impl TryFrom<RawMoment> for Moment {
    type Error = IrError;

    fn try_from(raw: RawMoment) -> IrResult<Self> {
        Moment::new(raw.operations)
    }
}

impl Moment {
    /// Create an empty moment.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a moment from operations.
    ///
    /// Fails if two operations share a qubit.
    pub fn new(operations: impl IntoIterator<Item = Operation>) -> IrResult<Self> {
        let mut moment = Self::empty();
        for op in operations {
            moment.push(op)?;
        }
        Ok(moment)
    }

    /// Return a copy of this moment with one more operation.
    pub fn with_operation(&self, op: Operation) -> IrResult<Self> {
        let mut moment = self.clone();
        moment.push(op)?;
        Ok(moment)
    }

    pub(crate) fn push(&mut self, op: Operation) -> IrResult<()> {
        if let Some(q) = op.qubits().iter().find(|q| self.operates_on_qubit(q)) {
            return Err(IrError::OverlappingMoment { qubit: q.clone() });
        }
        self.operations.push(op);
        Ok(())
    }

    /// Check if any operation in this moment acts on one of `qubits`.
    pub fn operates_on(&self, qubits: &[Qubit]) -> bool {
        self.operations.iter().any(|op| op.touches(qubits))
    }

    fn operates_on_qubit(&self, qubit: &Qubit) -> bool {
        self.operations
            .iter()
            .any(|op| op.qubits().contains(qubit))
    }

    /// Check if any measurement in this moment uses `key`.
    pub fn uses_measurement_key(&self, key: &str) -> bool {
        self.operations
            .iter()
            .any(|op| op.measurement_key() == Some(key))
    }

    /// The operations in insertion order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// The qubits touched by this moment.
    pub fn qubits(&self) -> impl Iterator<Item = &Qubit> {
        self.operations.iter().flat_map(|op| op.qubits())
    }

    /// The operation acting on `qubit`, if any.
    pub fn operation_at(&self, qubit: &Qubit) -> Option<&Operation> {
        self.operations
            .iter()
            .find(|op| op.qubits().contains(qubit))
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if this moment has no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{cnot, h, x};
    use crate::qubit::LineQubit;

    #[test]
    fn test_disjoint_operations() {
        let m = Moment::new([h(LineQubit(0)), h(LineQubit(1))]).unwrap();
        assert_eq!(m.len(), 2);
        assert!(m.operates_on(&[LineQubit(1).into()]));
        assert!(!m.operates_on(&[LineQubit(2).into()]));
    }

    #[test]
    fn test_overlap_rejected() {
        let err = Moment::new([
            h(LineQubit(0)),
            cnot(LineQubit(0), LineQubit(1)).unwrap(),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            IrError::OverlappingMoment {
                qubit: LineQubit(0).into()
            }
        );
    }

    #[test]
    fn test_deserialize_rejects_overlap() {
        let json = serde_json::json!({
            "operations": [h(LineQubit(0)), x(LineQubit(0))],
        });
        let err = serde_json::from_value::<Moment>(json).unwrap_err();
        assert!(err.to_string().contains("Overlapping operations on qubit 0"), "{err}");

        let json = serde_json::json!({
            "operations": [h(LineQubit(0)), x(LineQubit(1))],
        });
        let m: Moment = serde_json::from_value(json).unwrap();
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn test_with_operation_is_persistent() {
        let m = Moment::new([x(LineQubit(0))]).unwrap();
        let m2 = m.with_operation(x(LineQubit(1))).unwrap();
        assert_eq!(m.len(), 1);
        assert_eq!(m2.len(), 2);
        assert!(m2.with_operation(x(LineQubit(0))).is_err());
    }
}
