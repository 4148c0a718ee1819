//! Statevector simulation engine.
//!
//! Basis states are indexed big-endian: of `n` qubits, qubit `0` is the
//! most significant bit, so `|01⟩` has qubit 0 in `|0⟩` and qubit 1 in `|1⟩`.

use ndarray::Array2;
use num_complex::Complex64;
use rand::Rng;

use ketline_ir::{Gate, GateFamily};

/// Amplitudes below this magnitude are treated as zero when collapsing.
const EPSILON: f64 = 1e-12;

/// A statevector representing a quantum state.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// The 2-norm of the state; `1.0` for a valid state.
    pub fn norm(&self) -> f64 {
        self.amplitudes
            .iter()
            .map(Complex64::norm_sqr)
            .sum::<f64>()
            .sqrt()
    }

    #[inline]
    fn mask(&self, qubit: usize) -> usize {
        1 << (self.num_qubits - 1 - qubit)
    }

    /// Apply a unitary gate to the qubits at the given positions.
    ///
    /// Measurement gates are ignored here; use [`Statevector::measure`].
    pub fn apply_gate(&mut self, gate: &Gate, targets: &[usize]) {
        let Gate::Pow { family, exponent } = gate else {
            return;
        };
        if (exponent - 1.0).abs() < EPSILON {
            match family {
                GateFamily::X => return self.apply_x(targets[0]),
                GateFamily::Z => return self.apply_z(targets[0]),
                GateFamily::H => return self.apply_h(targets[0]),
                GateFamily::CNot => return self.apply_cx(targets[0], targets[1]),
                GateFamily::CZ => return self.apply_cz(targets[0], targets[1]),
                GateFamily::Swap => return self.apply_swap(targets[0], targets[1]),
                GateFamily::Y | GateFamily::ISwap => {}
            }
        }
        if let Some(matrix) = gate.unitary() {
            self.apply_unitary(&matrix, targets);
        }
    }

    /// Apply a `2^k x 2^k` unitary to `k` target qubits.
    ///
    /// The first target is the most significant bit of the matrix index.
    pub fn apply_unitary(&mut self, matrix: &Array2<Complex64>, targets: &[usize]) {
        let k = targets.len();
        let dim = 1usize << k;
        debug_assert_eq!(matrix.dim(), (dim, dim));

        let masks: Vec<usize> = targets.iter().map(|&q| self.mask(q)).collect();
        let all = masks.iter().fold(0, |acc, m| acc | m);
        let offsets: Vec<usize> = (0..dim)
            .map(|local| {
                masks
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| local & (1 << (k - 1 - j)) != 0)
                    .fold(0, |acc, (_, m)| acc | m)
            })
            .collect();

        let mut gathered = vec![Complex64::new(0.0, 0.0); dim];
        for base in 0..self.amplitudes.len() {
            if base & all != 0 {
                continue;
            }
            for (slot, offset) in gathered.iter_mut().zip(&offsets) {
                *slot = self.amplitudes[base | offset];
            }
            for (row, offset) in offsets.iter().enumerate() {
                self.amplitudes[base | offset] = matrix
                    .row(row)
                    .iter()
                    .zip(&gathered)
                    .map(|(m, a)| m * a)
                    .sum();
            }
        }
    }

    // =========================================================================
    // Integral-exponent fast paths
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = self.mask(qubit);
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    fn apply_z(&mut self, qubit: usize) {
        let mask = self.mask(qubit);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp = -*amp;
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = self.mask(qubit);
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = self.mask(control);
        let tgt_mask = self.mask(target);
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    fn apply_cz(&mut self, a: usize, b: usize) {
        let both = self.mask(a) | self.mask(b);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & both == both {
                *amp = -*amp;
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = self.mask(q1);
        let mask2 = self.mask(q2);
        for i in 0..self.amplitudes.len() {
            if (i & mask1 != 0) && (i & mask2 == 0) {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Read the bits of `targets` out of a basis-state index.
    pub fn bits_of(&self, index: usize, targets: &[usize]) -> Vec<bool> {
        targets
            .iter()
            .map(|&q| index & self.mask(q) != 0)
            .collect()
    }

    /// Measure `targets` in the computational basis, collapsing the state.
    ///
    /// Returns one bit per target, in target order.
    pub fn measure(&mut self, targets: &[usize], rng: &mut impl Rng) -> Vec<bool> {
        let outcome = self.sample_index(rng);
        let bits = self.bits_of(outcome, targets);

        let masks: Vec<usize> = targets.iter().map(|&q| self.mask(q)).collect();
        let keep = |i: usize| {
            masks
                .iter()
                .zip(&bits)
                .all(|(m, &bit)| (i & m != 0) == bit)
        };

        let mut norm_sq = 0.0;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if keep(i) {
                norm_sq += amp.norm_sqr();
            } else {
                *amp = Complex64::new(0.0, 0.0);
            }
        }
        let norm = norm_sq.sqrt();
        if norm > EPSILON {
            for amp in &mut self.amplitudes {
                *amp /= norm;
            }
        }
        bits
    }

    /// Sample a basis-state index without collapsing.
    pub fn sample_index(&self, rng: &mut impl Rng) -> usize {
        let r: f64 = rng.r#gen();

        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                return i;
            }
        }

        // Rounding can leave the total just below 1; fall back to the last
        // state with non-zero probability.
        self.amplitudes
            .iter()
            .rposition(|a| a.norm_sqr() > EPSILON)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_hadamard() {
        let mut sv = Statevector::new(1);
        sv.apply_gate(&Gate::H, &[0]);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2);
        sv.apply_gate(&Gate::H, &[0]);
        sv.apply_gate(&Gate::CNOT, &[0, 1]);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_big_endian_order() {
        // X on the second of two qubits gives |01⟩ = index 1.
        let mut sv = Statevector::new(2);
        sv.apply_gate(&Gate::X, &[1]);
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(1.0, 0.0)));

        // X on the first gives |10⟩ = index 2.
        let mut sv = Statevector::new(2);
        sv.apply_gate(&Gate::X, &[0]);
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_fast_paths_match_matrices() {
        let cases: [(Gate, &[usize]); 6] = [
            (Gate::X, &[1]),
            (Gate::Z, &[0]),
            (Gate::H, &[2]),
            (Gate::CNOT, &[2, 0]),
            (Gate::CZ, &[0, 1]),
            (Gate::SWAP, &[0, 2]),
        ];
        for (gate, targets) in cases {
            // Start from a state with distinct amplitudes everywhere.
            let mut prep = Statevector::new(3);
            prep.apply_gate(&Gate::y_pow(0.3), &[0]);
            prep.apply_gate(&Gate::x_pow(0.7), &[1]);
            prep.apply_gate(&Gate::H, &[2]);
            prep.apply_gate(&Gate::z_pow(0.25), &[2]);

            let mut fast = prep.clone();
            fast.apply_gate(&gate, targets);
            let mut slow = prep;
            slow.apply_unitary(&gate.unitary().unwrap(), targets);

            for (a, b) in fast.amplitudes.iter().zip(&slow.amplitudes) {
                assert!(approx_eq(*a, *b), "{gate} on {targets:?} disagrees");
            }
        }
    }

    #[test]
    fn test_cnot_control_order() {
        // Control on qubit 1, target qubit 0: |01⟩ -> |11⟩.
        let mut sv = Statevector::new(2);
        sv.apply_gate(&Gate::X, &[1]);
        sv.apply_unitary(&Gate::CNOT.unitary().unwrap(), &[1, 0]);
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_sqrt_x_is_even_split() {
        let mut sv = Statevector::new(1);
        sv.apply_gate(&Gate::x_pow(0.5), &[0]);
        let p = sv.probabilities();
        assert!((p[0] - 0.5).abs() < 1e-10);
        assert!((p[1] - 0.5).abs() < 1e-10);
        assert!((sv.norm() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_sample_deterministic() {
        // |1⟩ state should always sample to 1
        let mut sv = Statevector::new(1);
        sv.apply_gate(&Gate::X, &[0]);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            assert_eq!(sv.sample_index(&mut rng), 1);
        }
    }

    #[test]
    fn test_measure_collapses_partner() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let mut sv = Statevector::new(2);
            sv.apply_gate(&Gate::H, &[0]);
            sv.apply_gate(&Gate::CNOT, &[0, 1]);

            let first = sv.measure(&[0], &mut rng);
            let second = sv.measure(&[1], &mut rng);
            assert_eq!(first, second);
            assert!((sv.norm() - 1.0).abs() < 1e-10);
        }
    }
}
