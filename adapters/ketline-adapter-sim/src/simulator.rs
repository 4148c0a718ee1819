//! Statevector simulator.

use rand::SeedableRng;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, instrument};

use ketline_ir::{Circuit, Operation, Qubit};

use crate::error::{SimError, SimResult};
use crate::result::{RunResult, StateVectorTrialResult};
use crate::statevector::Statevector;

/// Widest statevector the simulator will ever allocate, whatever the config says.
pub const MAX_SUPPORTED_QUBITS: usize = 32;

/// Simulator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Widest circuit accepted; capped at [`MAX_SUPPORTED_QUBITS`].
    pub max_qubits: usize,
    /// RNG seed; `None` seeds from system entropy.
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_qubits: 20,
            seed: None,
        }
    }
}

/// Local statevector simulator.
///
/// Qubits are ordered by their natural order, and the first qubit is the most
/// significant bit of a basis-state index.
pub struct Simulator {
    config: SimulatorConfig,
    rng: StdRng,
}

impl Simulator {
    /// Create a simulator with default settings.
    pub fn new() -> Self {
        Self::with_config(SimulatorConfig::default())
    }

    /// Create a simulator with the given settings.
    pub fn with_config(config: SimulatorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Create a simulator with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(SimulatorConfig {
            seed: Some(seed),
            ..SimulatorConfig::default()
        })
    }

    /// The active settings.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Evolve the circuit once and keep the final state.
    ///
    /// Measurements collapse the state and their bits are recorded.
    #[instrument(skip(self, circuit))]
    pub fn simulate(&mut self, circuit: &Circuit) -> SimResult<StateVectorTrialResult> {
        let start = Instant::now();
        let layout = self.layout(circuit)?;
        debug!(
            "Simulating {} qubits over {} moments",
            layout.qubits.len(),
            circuit.depth()
        );

        let (state, measurements) = self.evolve(circuit, &layout, true);

        debug!("Simulation completed in {:?}", start.elapsed());
        Ok(StateVectorTrialResult::new(
            layout.qubits,
            state,
            measurements,
        ))
    }

    /// Sample the circuit's measurements `repetitions` times.
    #[instrument(skip(self, circuit))]
    pub fn run(&mut self, circuit: &Circuit, repetitions: usize) -> SimResult<RunResult> {
        if !circuit.has_measurements() {
            return Err(SimError::NoMeasurements);
        }
        let start = Instant::now();
        let layout = self.layout(circuit)?;

        let mut records: BTreeMap<String, Vec<Vec<bool>>> = circuit
            .measurement_keys()
            .into_iter()
            .map(|key| (key.to_string(), Vec::with_capacity(repetitions)))
            .collect();

        if circuit.are_all_measurements_terminal() {
            debug!("Terminal measurements: sampling final distribution");
            let (state, _) = self.evolve(circuit, &layout, false);
            let dist = WeightedIndex::new(state.probabilities())
                .map_err(|e| SimError::Sampling(e.to_string()))?;

            let measured: Vec<(&str, Vec<usize>)> = circuit
                .all_operations()
                .filter_map(|op| Some((op.measurement_key()?, layout.targets(op))))
                .collect();

            for _ in 0..repetitions {
                let outcome = dist.sample(&mut self.rng);
                for (key, targets) in &measured {
                    if let Some(rows) = records.get_mut(*key) {
                        rows.push(state.bits_of(outcome, targets));
                    }
                }
            }
        } else {
            debug!("Mid-circuit measurements: simulating each repetition");
            for rep in 0..repetitions {
                let (_, measurements) = self.evolve(circuit, &layout, true);
                for (key, bits) in measurements {
                    records.entry(key).or_default().push(bits);
                }

                if rep > 0 && rep % 1000 == 0 {
                    debug!("Completed {} repetitions", rep);
                }
            }
        }

        debug!(
            "Sampled {} repetitions in {:?}",
            repetitions,
            start.elapsed()
        );
        Ok(RunResult::new(repetitions, records))
    }

    fn layout(&self, circuit: &Circuit) -> SimResult<Layout> {
        let qubits = circuit.all_qubits();
        let max = self.config.max_qubits.min(MAX_SUPPORTED_QUBITS);
        if qubits.len() > max {
            return Err(SimError::TooManyQubits {
                got: qubits.len(),
                max,
            });
        }
        let index = qubits
            .iter()
            .enumerate()
            .map(|(i, q)| (q.clone(), i))
            .collect();
        Ok(Layout { qubits, index })
    }

    /// Apply every moment in order. Measurements are skipped unless `measure` is set.
    fn evolve(
        &mut self,
        circuit: &Circuit,
        layout: &Layout,
        measure: bool,
    ) -> (Statevector, BTreeMap<String, Vec<bool>>) {
        let mut state = Statevector::new(layout.qubits.len());
        let mut measurements = BTreeMap::new();

        for moment in circuit.moments() {
            for op in moment.operations() {
                let targets = layout.targets(op);
                match op.measurement_key() {
                    Some(key) if measure => {
                        let bits = state.measure(&targets, &mut self.rng);
                        measurements.insert(key.to_string(), bits);
                    }
                    Some(_) => {}
                    None => state.apply_gate(op.gate(), &targets),
                }
            }
        }
        (state, measurements)
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Position of each circuit qubit in the statevector.
struct Layout {
    qubits: Vec<Qubit>,
    index: FxHashMap<Qubit, usize>,
}

impl Layout {
    fn targets(&self, op: &Operation) -> Vec<usize> {
        // Every operation qubit comes from `Circuit::all_qubits`.
        op.qubits().iter().map(|q| self.index[q]).collect()
    }
}
