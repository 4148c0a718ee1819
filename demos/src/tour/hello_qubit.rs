//! One qubit, one gate, one measurement.

use ketline_adapter_sim::{RunResult, Simulator};
use ketline_ir::ops::measure;
use ketline_ir::{Circuit, Gate, GridQubit, IrResult};

/// Measurement key used by the hello circuit.
pub const KEY: &str = "m1";

/// Repetitions sampled by default.
pub const DEFAULT_REPETITIONS: usize = 20;

/// `X^exponent` on grid qubit (0, 0), then measure it under [`KEY`].
pub fn hello_circuit(exponent: f64) -> IrResult<Circuit> {
    let qubit = GridQubit::new(0, 0);
    Circuit::from_ops([
        Gate::x_pow(exponent).on([qubit])?,
        measure([qubit], Some(KEY))?,
    ])
}

/// Build the hello circuit and sample it.
pub fn run_hello(
    sim: &mut Simulator,
    exponent: f64,
    repetitions: usize,
) -> anyhow::Result<(Circuit, RunResult)> {
    let circuit = hello_circuit(exponent)?;
    let result = sim.run(&circuit, repetitions)?;
    Ok((circuit, result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_diagram() {
        assert_eq!(
            hello_circuit(1.0).unwrap().to_string(),
            "(0, 0): ───X───M('m1')───"
        );
        assert_eq!(
            hello_circuit(0.5).unwrap().to_string(),
            "(0, 0): ───X^0.5───M('m1')───"
        );
    }

    #[test]
    fn test_hello_run_all_ones() {
        let mut sim = Simulator::with_seed(0);
        let (_, result) = run_hello(&mut sim, 1.0, DEFAULT_REPETITIONS).unwrap();
        assert_eq!(result.to_string(), "m1=11111111111111111111");
    }
}
