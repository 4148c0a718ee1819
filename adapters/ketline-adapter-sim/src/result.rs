//! Simulation and sampling results.

use num_complex::Complex64;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use ketline_ir::Qubit;

use crate::error::{SimError, SimResult};
use crate::statevector::Statevector;

/// Decimals kept when printing amplitudes.
const DIRAC_DECIMALS: usize = 3;

/// The outcome of simulating a circuit once, keeping the full state.
#[derive(Debug, Clone)]
pub struct StateVectorTrialResult {
    qubits: Vec<Qubit>,
    final_state: Statevector,
    measurements: BTreeMap<String, Vec<bool>>,
}

impl StateVectorTrialResult {
    pub(crate) fn new(
        qubits: Vec<Qubit>,
        final_state: Statevector,
        measurements: BTreeMap<String, Vec<bool>>,
    ) -> Self {
        Self {
            qubits,
            final_state,
            measurements,
        }
    }

    /// The state after the last moment.
    pub fn final_state(&self) -> &Statevector {
        &self.final_state
    }

    /// Bits recorded by each measurement, keyed by measurement key.
    pub fn measurements(&self) -> &BTreeMap<String, Vec<bool>> {
        &self.measurements
    }

    /// Qubits in basis-state order, most significant first.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// The final state in Dirac notation, e.g. `0.707|00⟩ + 0.707|11⟩`.
    pub fn dirac_notation(&self) -> String {
        dirac_notation(self.final_state.amplitudes(), self.final_state.num_qubits())
    }
}

impl fmt::Display for StateVectorTrialResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "measurements: ")?;
        if self.measurements.is_empty() {
            write!(f, "(no measurements)")?;
        } else {
            let parts: Vec<String> = self
                .measurements
                .iter()
                .map(|(key, bits)| format!("{key}={}", bit_string(bits.iter().copied())))
                .collect();
            write!(f, "{}", parts.join(" "))?;
        }
        write!(f, "\noutput vector: {}", self.dirac_notation())
    }
}

/// Render amplitudes as a sum of kets.
pub fn dirac_notation(amplitudes: &[Complex64], num_qubits: usize) -> String {
    let mut terms = vec![];
    for (index, amp) in amplitudes.iter().enumerate() {
        let Some(coefficient) = format_coefficient(*amp) else {
            continue;
        };
        let ket = if num_qubits == 0 {
            "|⟩".to_string()
        } else {
            format!("|{index:0num_qubits$b}⟩")
        };
        terms.push(format!("{coefficient}{ket}"));
    }
    if terms.is_empty() {
        return "0".to_string();
    }
    terms.join(" + ").replace("+ -", "- ")
}

/// Format one amplitude, or `None` when it rounds to zero.
fn format_coefficient(amp: Complex64) -> Option<String> {
    let re = round(amp.re);
    let im = round(amp.im);
    match (re != 0.0, im != 0.0) {
        (false, false) => None,
        (true, false) if re == 1.0 => Some(String::new()),
        (true, false) if re == -1.0 => Some("-".to_string()),
        (true, false) => Some(format_real(re)),
        (false, true) => Some(format!("{}j", format_real(im))),
        (true, true) => {
            let sign = if im < 0.0 { "" } else { "+" };
            Some(format!("({}{sign}{}j)", format_real(re), format_real(im)))
        }
    }
}

fn round(value: f64) -> f64 {
    let scale = 10f64.powi(DIRAC_DECIMALS as i32);
    let rounded = (value * scale).round() / scale;
    // Collapse -0.0.
    if rounded == 0.0 { 0.0 } else { rounded }
}

fn format_real(value: f64) -> String {
    let s = format!("{:.*}", DIRAC_DECIMALS, value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn bit_string(bits: impl IntoIterator<Item = bool>) -> String {
    bits.into_iter().map(|b| if b { '1' } else { '0' }).collect()
}

// =============================================================================
// Sampling results
// =============================================================================

/// Measurement outcomes gathered over repeated runs.
///
/// For each key, one row per repetition, one bit per measured qubit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    repetitions: usize,
    records: BTreeMap<String, Vec<Vec<bool>>>,
}

impl RunResult {
    pub(crate) fn new(repetitions: usize, records: BTreeMap<String, Vec<Vec<bool>>>) -> Self {
        Self {
            repetitions,
            records,
        }
    }

    /// Number of repetitions sampled.
    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    /// Measurement keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// The repetitions x qubits table of bits for `key`.
    pub fn measurements(&self, key: &str) -> SimResult<&[Vec<bool>]> {
        self.records
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| SimError::UnknownMeasurementKey(key.to_string()))
    }

    /// Count how often each outcome of `key` occurred.
    ///
    /// Each row is read as a big-endian integer: the first measured qubit is
    /// the most significant bit.
    pub fn histogram(&self, key: &str) -> SimResult<Histogram> {
        let rows = self.measurements(key)?;
        if let Some(row) = rows.iter().find(|row| row.len() > u64::BITS as usize) {
            return Err(SimError::OutcomeTooWide {
                key: key.to_string(),
                width: row.len(),
            });
        }

        let mut counts = FxHashMap::default();
        for row in rows {
            let value = row.iter().fold(0u64, |acc, &b| (acc << 1) | u64::from(b));
            *counts.entry(value).or_insert(0) += 1;
        }
        Ok(Histogram { counts })
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, rows) in &self.records {
            if !first {
                writeln!(f)?;
            }
            first = false;

            let width = rows.first().map_or(0, Vec::len);
            let per_qubit: Vec<String> = (0..width)
                .map(|q| bit_string(rows.iter().map(|row| row[q])))
                .collect();
            write!(f, "{key}={}", per_qubit.join(", "))?;
        }
        Ok(())
    }
}

/// Outcome counts for one measurement key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Histogram {
    counts: FxHashMap<u64, usize>,
}

impl Histogram {
    /// Count for a given outcome value (0 if never seen).
    pub fn get(&self, value: u64) -> usize {
        self.counts.get(&value).copied().unwrap_or(0)
    }

    /// Total number of samples.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no samples were recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Outcomes by descending count; ties broken by ascending value.
    pub fn most_common(&self) -> Vec<(u64, usize)> {
        let mut entries: Vec<(u64, usize)> = self.counts.iter().map(|(&v, &c)| (v, c)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        entries
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self
            .most_common()
            .into_iter()
            .map(|(value, count)| format!("{value}: {count}"))
            .collect();
        write!(f, "{{{}}}", entries.join(", "))
    }
}
