//! Hello Qubit Demo
//!
//! Applies a power of X to one grid qubit, measures it and samples the result.

use clap::Parser;

use ketline_adapter_sim::{Simulator, SimulatorConfig};
use ketline_demos::tour::hello_qubit::{DEFAULT_REPETITIONS, run_hello};
use ketline_demos::{CommonArgs, init_logging, print_block, print_header, print_section};

#[derive(Parser, Debug)]
#[command(name = "hello-qubit")]
#[command(about = "Measure a single qubit after a power of X")]
struct Args {
    /// Exponent of the X gate (0.5 is a square root of NOT)
    #[arg(short, long, default_value = "1.0")]
    exponent: f64,

    /// Number of repetitions to sample
    #[arg(short, long, env = "KETLINE_REPETITIONS", default_value_t = DEFAULT_REPETITIONS)]
    repetitions: usize,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.common.verbose);

    let mut sim = Simulator::with_config(SimulatorConfig {
        seed: args.common.seed,
        ..SimulatorConfig::default()
    });
    let (circuit, result) = run_hello(&mut sim, args.exponent, args.repetitions)?;

    if args.common.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_header("Hello Qubit");

    print_section("Circuit");
    print_block("Circuit", &circuit);

    print_section("Simulation");
    print_block("Results from simulator", &result);

    Ok(())
}
