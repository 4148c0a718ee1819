//! Ketline Circuit Model
//!
//! This crate provides the data structures for describing quantum circuits:
//! qubit identifiers, gates, operations, moments, circuits and the device
//! constraints a circuit can be checked against.
//!
//! # Overview
//!
//! A [`Circuit`] is an ordered list of [`Moment`]s. Each moment is a time
//! slice of [`Operation`]s on disjoint qubits. Operations appended to a
//! circuit are packed into moments according to an [`InsertStrategy`]. The
//! default strategy slides each operation back to the earliest moment in
//! which its qubits are free.
//!
//! # Core Components
//!
//! - **Qubits**: [`NamedQubit`], [`LineQubit`] and [`GridQubit`], unified as [`Qubit`]
//! - **Gates**: [`Gate`] eigen gates raised to a real exponent, plus measurement
//! - **Operations**: [`Operation`], a gate bound to qubits
//! - **Moments**: [`Moment`], disjoint operations in one time slice
//! - **Circuits**: [`Circuit`], with a text diagram as its `Display`
//! - **Devices**: [`Device`], [`GridDevice`] and [`UnconstrainedDevice`]
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use ketline_ir::{Circuit, InsertStrategy, LineQubit};
//! use ketline_ir::ops::{cnot, h, measure};
//!
//! let q = LineQubit::range(2);
//! let mut circuit = Circuit::new();
//! circuit.append([h(q[0]), cnot(q[0], q[1]).unwrap()], InsertStrategy::Earliest).unwrap();
//! circuit.push(measure([q[0], q[1]], Some("result")).unwrap()).unwrap();
//!
//! assert_eq!(circuit.depth(), 3);
//! println!("{circuit}");
//! ```
//!
//! # Example: Device Constraints
//!
//! ```rust
//! use ketline_ir::{Circuit, GridDevice, GridQubit, IrError};
//! use ketline_ir::ops::cz;
//!
//! let (q0, q1, q2) = (GridQubit::new(0, 0), GridQubit::new(0, 1), GridQubit::new(0, 2));
//! let mut circuit = Circuit::with_device(GridDevice::foxtail());
//! circuit.push(cz(q0, q1).unwrap()).unwrap();
//! assert!(matches!(circuit.push(cz(q0, q2).unwrap()), Err(IrError::Device(_))));
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `X`, `Y`, `Z` | 1 | Pauli gates and their powers |
//! | `H` | 1 | Hadamard gate and its powers |
//! | `CNOT` | 2 | Controlled-NOT and its powers |
//! | `CZ` | 2 | Controlled-Z and its powers |
//! | `SWAP` | 2 | SWAP and its powers |
//! | `ISWAP` | 2 | iSWAP and its powers (`SQRT_ISWAP`) |
//! | `measure` | n | Computational-basis measurement under a key |

pub mod circuit;
pub mod device;
mod diagram;
pub mod error;
pub mod gate;
pub mod moment;
pub mod operation;
pub mod qubit;

pub use circuit::{Circuit, InsertStrategy};
pub use device::{Device, GridDevice, UnconstrainedDevice};
pub use error::{DeviceError, IrError, IrResult};
pub use gate::{Gate, GateFamily};
pub use moment::Moment;
pub use operation::Operation;
pub use qubit::{GridQubit, LineQubit, NamedQubit, Qubit};

/// Operation constructors named after the gates they apply.
pub mod ops {
    pub use crate::operation::{cnot, cz, h, iswap, measure, swap, x, y, z};
}
