//! Tour steps shared by the demo binaries.

pub mod basics;
pub mod hello_qubit;
