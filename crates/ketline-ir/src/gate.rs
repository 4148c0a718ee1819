//! Quantum gate types.
//!
//! Every unitary gate here is an eigen gate: it is described by a list of
//! eigen-components `(theta, P)` where `P` is a projector and `theta` an
//! eigenphase in half turns. Raising the gate to exponent `t` gives
//! `sum exp(i * pi * t * theta) * P`, so `X^0.5` is the square root of NOT
//! and `ISWAP^0.5` is the square root of iSWAP without any special casing.

use ndarray::{Array2, array};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::operation::Operation;
use crate::qubit::Qubit;

/// Family of a unitary eigen gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateFamily {
    /// Pauli-X (bit flip).
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z (phase flip).
    Z,
    /// Hadamard.
    H,
    /// Controlled-NOT.
    CNot,
    /// Controlled-Z.
    CZ,
    /// SWAP.
    Swap,
    /// iSWAP.
    ISwap,
}

impl GateFamily {
    /// Get the name of this gate family.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            GateFamily::X => "X",
            GateFamily::Y => "Y",
            GateFamily::Z => "Z",
            GateFamily::H => "H",
            GateFamily::CNot => "CNOT",
            GateFamily::CZ => "CZ",
            GateFamily::Swap => "SWAP",
            GateFamily::ISwap => "ISWAP",
        }
    }

    /// Get the number of qubits this family operates on.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        match self {
            GateFamily::X | GateFamily::Y | GateFamily::Z | GateFamily::H => 1,
            GateFamily::CNot | GateFamily::CZ | GateFamily::Swap | GateFamily::ISwap => 2,
        }
    }

    /// Per-wire diagram symbols at exponent 1.
    fn wire_symbols(&self) -> &'static [&'static str] {
        match self {
            GateFamily::X => &["X"],
            GateFamily::Y => &["Y"],
            GateFamily::Z => &["Z"],
            GateFamily::H => &["H"],
            GateFamily::CNot => &["@", "X"],
            GateFamily::CZ => &["@", "@"],
            GateFamily::Swap => &["×", "×"],
            GateFamily::ISwap => &["iSwap", "iSwap"],
        }
    }

    /// Eigen-components `(theta, projector)` with `theta` in half turns.
    pub fn eigen_components(&self) -> Vec<(f64, Array2<Complex64>)> {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        match self {
            GateFamily::X => involution(array![[zero, one], [one, zero]]),
            GateFamily::Y => involution(array![[zero, -i], [i, zero]]),
            GateFamily::Z => involution(array![[one, zero], [zero, -one]]),
            GateFamily::H => {
                let s = Complex64::new(1.0 / 2.0_f64.sqrt(), 0.0);
                involution(array![[s, s], [s, -s]])
            }
            GateFamily::CNot => involution(array![
                [one, zero, zero, zero],
                [zero, one, zero, zero],
                [zero, zero, zero, one],
                [zero, zero, one, zero],
            ]),
            GateFamily::CZ => involution(array![
                [one, zero, zero, zero],
                [zero, one, zero, zero],
                [zero, zero, one, zero],
                [zero, zero, zero, -one],
            ]),
            GateFamily::Swap => involution(array![
                [one, zero, zero, zero],
                [zero, zero, one, zero],
                [zero, one, zero, zero],
                [zero, zero, zero, one],
            ]),
            GateFamily::ISwap => {
                let h = Complex64::new(0.5, 0.0);
                vec![
                    (
                        0.0,
                        array![
                            [one, zero, zero, zero],
                            [zero, zero, zero, zero],
                            [zero, zero, zero, zero],
                            [zero, zero, zero, one],
                        ],
                    ),
                    (
                        0.5,
                        array![
                            [zero, zero, zero, zero],
                            [zero, h, h, zero],
                            [zero, h, h, zero],
                            [zero, zero, zero, zero],
                        ],
                    ),
                    (
                        -0.5,
                        array![
                            [zero, zero, zero, zero],
                            [zero, h, -h, zero],
                            [zero, -h, h, zero],
                            [zero, zero, zero, zero],
                        ],
                    ),
                ]
            }
        }
    }
}

/// Split a self-inverse unitary `U` into its `+1` and `-1` eigenspace projectors.
fn involution(u: Array2<Complex64>) -> Vec<(f64, Array2<Complex64>)> {
    let eye = Array2::<Complex64>::eye(u.nrows());
    let plus = (&eye + &u).mapv(|v| v * 0.5);
    let minus = (&eye - &u).mapv(|v| v * 0.5);
    vec![(0.0, plus), (1.0, minus)]
}

/// A quantum gate: an eigen gate raised to an exponent, or a measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// A unitary eigen gate raised to a real exponent.
    Pow {
        /// The gate family.
        family: GateFamily,
        /// The exponent; `1.0` is the plain gate.
        exponent: f64,
    },
    /// A computational-basis measurement on any number of qubits.
    Measure {
        /// Result key. Resolved to the default key when bound to qubits.
        key: Option<String>,
    },
}

impl Gate {
    /// Pauli-X (NOT) gate.
    pub const X: Gate = Gate::pow_gate(GateFamily::X, 1.0);
    /// Pauli-Y gate.
    pub const Y: Gate = Gate::pow_gate(GateFamily::Y, 1.0);
    /// Pauli-Z gate.
    pub const Z: Gate = Gate::pow_gate(GateFamily::Z, 1.0);
    /// Hadamard gate.
    pub const H: Gate = Gate::pow_gate(GateFamily::H, 1.0);
    /// Controlled-NOT gate.
    pub const CNOT: Gate = Gate::pow_gate(GateFamily::CNot, 1.0);
    /// Controlled-Z gate.
    pub const CZ: Gate = Gate::pow_gate(GateFamily::CZ, 1.0);
    /// SWAP gate.
    pub const SWAP: Gate = Gate::pow_gate(GateFamily::Swap, 1.0);
    /// iSWAP gate.
    pub const ISWAP: Gate = Gate::pow_gate(GateFamily::ISwap, 1.0);
    /// Square root of iSWAP.
    pub const SQRT_ISWAP: Gate = Gate::pow_gate(GateFamily::ISwap, 0.5);

    /// Create an eigen gate with an explicit exponent.
    pub const fn pow_gate(family: GateFamily, exponent: f64) -> Self {
        Gate::Pow { family, exponent }
    }

    /// `X^exponent`.
    pub const fn x_pow(exponent: f64) -> Self {
        Self::pow_gate(GateFamily::X, exponent)
    }

    /// `Y^exponent`.
    pub const fn y_pow(exponent: f64) -> Self {
        Self::pow_gate(GateFamily::Y, exponent)
    }

    /// `Z^exponent`.
    pub const fn z_pow(exponent: f64) -> Self {
        Self::pow_gate(GateFamily::Z, exponent)
    }

    /// A measurement gate. `None` picks the default key when the gate is applied.
    pub fn measure(key: Option<String>) -> Self {
        Gate::Measure { key }
    }

    /// Raise the gate to a power. Exponents multiply.
    pub fn pow(&self, exponent: f64) -> IrResult<Gate> {
        match self {
            Gate::Pow {
                family,
                exponent: current,
            } => Ok(Gate::pow_gate(*family, current * exponent)),
            Gate::Measure { .. } => Err(IrError::NotPowerable(self.name().into())),
        }
    }

    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Gate::Pow { family, .. } => family.name(),
            Gate::Measure { .. } => "measure",
        }
    }

    /// The gate family, if unitary.
    pub fn family(&self) -> Option<GateFamily> {
        match self {
            Gate::Pow { family, .. } => Some(*family),
            Gate::Measure { .. } => None,
        }
    }

    /// The exponent, if unitary.
    pub fn exponent(&self) -> Option<f64> {
        match self {
            Gate::Pow { exponent, .. } => Some(*exponent),
            Gate::Measure { .. } => None,
        }
    }

    /// Fixed arity of the gate. Measurements accept any non-zero count.
    pub fn num_qubits(&self) -> Option<usize> {
        match self {
            Gate::Pow { family, .. } => Some(family.num_qubits()),
            Gate::Measure { .. } => None,
        }
    }

    /// Check if this is a measurement.
    pub fn is_measurement(&self) -> bool {
        matches!(self, Gate::Measure { .. })
    }

    /// The unitary matrix, row-major, first operand as most significant bit.
    ///
    /// Returns `None` for measurements.
    pub fn unitary(&self) -> Option<Array2<Complex64>> {
        let Gate::Pow { family, exponent } = self else {
            return None;
        };
        let dim = 1usize << family.num_qubits();
        let mut acc = Array2::<Complex64>::zeros((dim, dim));
        for (theta, projector) in family.eigen_components() {
            let phase = Complex64::from_polar(1.0, PI * exponent * theta);
            acc.scaled_add(phase, &projector);
        }
        Some(acc)
    }

    /// Per-wire diagram symbols for this gate applied to `num_qubits` wires.
    pub(crate) fn wire_symbols(&self, num_qubits: usize) -> Vec<String> {
        match self {
            Gate::Pow { family, exponent } => {
                let suffix = format_exponent(*exponent);
                let symbols = family.wire_symbols();
                // The exponent is drawn on the last wire only.
                symbols
                    .iter()
                    .enumerate()
                    .map(|(i, s)| {
                        if i + 1 == symbols.len() {
                            format!("{s}{suffix}")
                        } else {
                            (*s).to_string()
                        }
                    })
                    .collect()
            }
            Gate::Measure { key } => (0..num_qubits)
                .map(|i| match (i, key) {
                    (0, Some(k)) => format!("M('{k}')"),
                    _ => "M".to_string(),
                })
                .collect(),
        }
    }

    /// Bind the gate to qubits, producing an operation.
    pub fn on<I, Q>(&self, qubits: I) -> IrResult<Operation>
    where
        I: IntoIterator<Item = Q>,
        Q: Into<Qubit>,
    {
        let qubits: Vec<Qubit> = qubits.into_iter().map(Into::into).collect();
        Operation::new(self.clone(), qubits)
    }
}

/// Format an exponent as a diagram suffix, rounded to three decimals.
pub(crate) fn format_exponent(exponent: f64) -> String {
    if (exponent - 1.0).abs() < 1e-12 {
        return String::new();
    }
    let rounded = (exponent * 1000.0).round() / 1000.0;
    format!("^{rounded}")
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Pow { family, exponent } => {
                write!(f, "{}{}", family.name(), format_exponent(*exponent))
            }
            Gate::Measure { key: Some(key) } => write!(f, "measure('{key}')"),
            Gate::Measure { key: None } => f.write_str("measure"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: &Array2<Complex64>, b: &Array2<Complex64>) -> bool {
        a.shape() == b.shape() && a.iter().zip(b.iter()).all(|(x, y)| (x - y).norm() < 1e-10)
    }

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_gate_properties() {
        assert_eq!(Gate::H.num_qubits(), Some(1));
        assert_eq!(Gate::CNOT.num_qubits(), Some(2));
        assert_eq!(Gate::measure(None).num_qubits(), None);
        assert_eq!(Gate::X.name(), "X");
        assert!(Gate::measure(Some("m".into())).is_measurement());
    }

    #[test]
    fn test_x_unitary() {
        let u = Gate::X.unitary().unwrap();
        let expected = array![[c(0.0, 0.0), c(1.0, 0.0)], [c(1.0, 0.0), c(0.0, 0.0)]];
        assert!(approx_eq(&u, &expected));
    }

    #[test]
    fn test_sqrt_x_squares_to_x() {
        let half = Gate::X.pow(0.5).unwrap().unitary().unwrap();
        let full = Gate::X.unitary().unwrap();
        assert!(approx_eq(&half.dot(&half), &full));
    }

    #[test]
    fn test_sqrt_x_matrix() {
        let u = Gate::x_pow(0.5).unitary().unwrap();
        let expected = array![[c(0.5, 0.5), c(0.5, -0.5)], [c(0.5, -0.5), c(0.5, 0.5)]];
        assert!(approx_eq(&u, &expected));
    }

    #[test]
    fn test_iswap_matrix() {
        let u = Gate::ISWAP.unitary().unwrap();
        assert!((u[[1, 2]] - c(0.0, 1.0)).norm() < 1e-10);
        assert!((u[[2, 1]] - c(0.0, 1.0)).norm() < 1e-10);
        assert!((u[[0, 0]] - c(1.0, 0.0)).norm() < 1e-10);
        assert!(u[[1, 1]].norm() < 1e-10);

        let sqrt = Gate::SQRT_ISWAP.unitary().unwrap();
        assert!(approx_eq(&sqrt.dot(&sqrt), &u));
    }

    #[test]
    fn test_unitaries_are_unitary() {
        let gates = [
            Gate::X,
            Gate::y_pow(0.25),
            Gate::z_pow(0.3),
            Gate::H.pow(0.7).unwrap(),
            Gate::CNOT,
            Gate::CZ.pow(0.5).unwrap(),
            Gate::SWAP,
            Gate::SQRT_ISWAP,
        ];
        for gate in gates {
            let u = gate.unitary().unwrap();
            let u_dag = u.t().mapv(|v| v.conj());
            let eye = Array2::<Complex64>::eye(u.nrows());
            assert!(approx_eq(&u.dot(&u_dag), &eye), "{gate} is not unitary");
        }
    }

    #[test]
    fn test_pow_composes() {
        let g = Gate::X.pow(0.5).unwrap().pow(0.5).unwrap();
        assert_eq!(g.exponent(), Some(0.25));
        assert!(Gate::measure(None).pow(2.0).is_err());
    }

    #[test]
    fn test_gate_display() {
        assert_eq!(Gate::X.to_string(), "X");
        assert_eq!(Gate::x_pow(0.5).to_string(), "X^0.5");
        assert_eq!(Gate::y_pow(1.0 / 3.0).to_string(), "Y^0.333");
        assert_eq!(Gate::SQRT_ISWAP.to_string(), "ISWAP^0.5");
    }

    #[test]
    fn test_wire_symbols() {
        assert_eq!(Gate::CNOT.wire_symbols(2), vec!["@", "X"]);
        assert_eq!(Gate::CZ.wire_symbols(2), vec!["@", "@"]);
        assert_eq!(
            Gate::CZ.pow(0.5).unwrap().wire_symbols(2),
            vec!["@", "@^0.5"]
        );
        assert_eq!(
            Gate::SQRT_ISWAP.wire_symbols(2),
            vec!["iSwap", "iSwap^0.5"]
        );
        assert_eq!(
            Gate::measure(Some("result".into())).wire_symbols(2),
            vec!["M('result')", "M"]
        );
    }
}
