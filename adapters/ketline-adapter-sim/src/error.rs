//! Error types for the simulator.

use thiserror::Error;

/// Errors that can occur while simulating or sampling a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Circuit is wider than the simulator allows.
    #[error("Circuit has {got} qubits but the simulator supports at most {max}")]
    TooManyQubits {
        /// Qubits in the circuit.
        got: usize,
        /// Configured limit.
        max: usize,
    },

    /// Sampling requested for a circuit without measurements.
    #[error("Circuit has no measurements to sample")]
    NoMeasurements,

    /// No measurement with this key exists in the result.
    #[error("Unknown measurement key: '{0}'")]
    UnknownMeasurementKey(String),

    /// A measurement is too wide to pack into a histogram value.
    #[error("Measurement '{key}' has {width} bits; histograms hold at most 64")]
    OutcomeTooWide {
        /// Measurement key.
        key: String,
        /// Bits per outcome.
        width: usize,
    },

    /// The state could not be sampled (zero or non-finite probabilities).
    #[error("Cannot sample state: {0}")]
    Sampling(String),
}

/// Result type for simulator operations.
pub type SimResult<T> = Result<T, SimError>;
