//! Ketline Local Statevector Simulator
//!
//! This crate simulates circuits built with `ketline-ir`. It keeps the full
//! statevector, which gives exact amplitudes but limits circuits to roughly
//! 20-25 qubits.
//!
//! # Features
//!
//! - **Exact Simulation**: [`Simulator::simulate`] returns the final state
//! - **Measurement Sampling**: [`Simulator::run`] repeats the circuit and
//!   records every measurement key
//! - **Reproducible**: a seed in [`SimulatorConfig`] fixes the sampled bits
//!
//! Basis states are big-endian: the first of the circuit's sorted qubits is
//! the most significant bit.
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//! | 25 | ~512 MB | Slow |
//!
//! # Example
//!
//! ```rust
//! use ketline_adapter_sim::Simulator;
//! use ketline_ir::{Circuit, LineQubit};
//! use ketline_ir::ops::measure;
//!
//! let mut sim = Simulator::with_seed(42);
//!
//! let bell = Circuit::bell().unwrap();
//! let state = sim.simulate(&bell).unwrap();
//! assert_eq!(state.dirac_notation(), "0.707|00⟩ + 0.707|11⟩");
//!
//! let mut measured = bell.clone();
//! measured.push(measure(LineQubit::range(2), Some("result")).unwrap()).unwrap();
//! let hist = sim.run(&measured, 1000).unwrap().histogram("result").unwrap();
//! assert_eq!(hist.get(0) + hist.get(3), 1000);
//! ```

pub mod error;
pub mod result;
mod simulator;
mod statevector;

pub use error::{SimError, SimResult};
pub use result::{Histogram, RunResult, StateVectorTrialResult};
pub use simulator::{MAX_SUPPORTED_QUBITS, Simulator, SimulatorConfig};
pub use statevector::Statevector;
