//! Error types for the IR crate.

use thiserror::Error;

use crate::qubit::Qubit;

/// Errors raised by a [`Device`](crate::device::Device) when it rejects an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DeviceError {
    /// The operation touches a qubit the device does not have.
    #[error("Qubit not on device: {qubit}")]
    QubitNotOnDevice {
        /// The offending qubit.
        qubit: Qubit,
    },

    /// The device cannot execute this gate family.
    #[error("Unsupported gate type: {operation}")]
    UnsupportedGate {
        /// Display form of the rejected operation.
        operation: String,
    },

    /// A multi-qubit operation acts on qubits that are not coupled.
    #[error("Non-local interaction: {operation}.")]
    NonLocalInteraction {
        /// Display form of the rejected operation.
        operation: String,
    },
}

/// Errors that can occur while building gates, moments and circuits.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate applied to the wrong number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: usize,
        /// Actual number of qubits provided.
        got: usize,
    },

    /// The same qubit appears twice in one operation.
    #[error("Duplicate qubit {qubit} in operation (gate: {gate_name})")]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: Qubit,
        /// Name of the gate.
        gate_name: String,
    },

    /// Two operations in one moment share a qubit.
    #[error("Overlapping operations on qubit {qubit} in moment")]
    OverlappingMoment {
        /// The shared qubit.
        qubit: Qubit,
    },

    /// A measurement key was used twice in one circuit.
    #[error("Measurement key '{0}' is already used in this circuit")]
    DuplicateMeasurementKey(String),

    /// The gate has no power (measurements).
    #[error("Gate '{0}' cannot be raised to a power")]
    NotPowerable(String),

    /// Invalid argument to a constructor.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The circuit's device rejected an operation.
    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
