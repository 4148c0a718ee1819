//! Basics Tour
//!
//! Walks through qubits, gates, moments, device constraints and simulation.

use clap::Parser;

use ketline_adapter_sim::{Simulator, SimulatorConfig};
use ketline_demos::tour::basics::{
    self, BELL_REPETITIONS, CircuitTour, DeviceTour, GateTour, QubitTour, SimulationTour,
};
use ketline_demos::{
    CommonArgs, init_logging, print_block, print_header, print_info, print_result, print_section,
    print_success, print_warning,
};

#[derive(Parser, Debug)]
#[command(name = "basics")]
#[command(about = "Tour of qubits, gates, circuits, devices and simulation")]
struct Args {
    /// Number of repetitions when sampling the Bell circuit
    #[arg(short, long, env = "KETLINE_REPETITIONS", default_value_t = BELL_REPETITIONS)]
    repetitions: usize,

    #[command(flatten)]
    common: CommonArgs,
}

fn show_qubits(tour: &QubitTour) {
    print_section("Qubits");
    print_result("Named", format!("{}, {}", tour.source, tour.target));
    print_result("Line", tour.line);
    let range: Vec<String> = tour.line_range.iter().map(ToString::to_string).collect();
    print_result("Line range", range.join(", "));
    print_result("Grid", tour.grid);
    print_result(
        "Square",
        format!(
            "{} qubits from {} to {}",
            tour.square.len(),
            tour.square.first().map(ToString::to_string).unwrap_or_default(),
            tour.square.last().map(ToString::to_string).unwrap_or_default(),
        ),
    );
    println!();
    print_block("Foxtail", &tour.foxtail);
}

fn show_gates(tour: &GateTour) {
    print_section("Gates and Operations");
    let gates: Vec<String> = tour.gates.iter().map(ToString::to_string).collect();
    print_result("Gates", gates.join(", "));
    for op in &tour.operations {
        print_result("Operation", op);
    }
}

fn show_circuits(tour: &CircuitTour) {
    print_section("Circuits and Moments");
    print_info("Operations slide into the earliest moment where their qubits are free");
    print_block("Hadamard layer", &tour.hadamard_layer);
    println!();
    print_block("SWAP chain", &tour.swap_chain);
    println!();
    print_block("One Hadamard per moment", &tour.explicit_moments);
}

fn show_devices(tour: &DeviceTour) {
    print_section("Circuits and Devices");
    print_block("Unconstrained device", &tour.free_circuit);
    println!();
    println!("Foxtail device:");
    match &tour.rejection {
        Some(e) => print_warning(&format!("Not allowed {e}")),
        None => print_success("Non-adjacent CZ accepted"),
    }
    print_result("Foxtail circuit operations", tour.foxtail_circuit.num_operations());
}

fn show_simulation(tour: &SimulationTour) {
    print_section("Simulation");
    print_block("Simulating the circuit", &tour.state);
    println!();
    print_block("Circuit with measurement", &tour.bell);
    println!();
    print_block("Sampling the circuit", &tour.histogram);
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.common.verbose);

    let mut sim = Simulator::with_config(SimulatorConfig {
        seed: args.common.seed,
        ..SimulatorConfig::default()
    });

    let qubits = basics::qubits();
    let gates = basics::gates_and_operations()?;
    let circuits = basics::circuits_and_moments()?;
    let devices = basics::devices()?;
    let simulation = basics::simulation(&mut sim, args.repetitions)?;

    if args.common.json {
        println!("{}", serde_json::to_string_pretty(&simulation.sampled)?);
        return Ok(());
    }

    print_header("Ketline Basics");
    show_qubits(&qubits);
    show_gates(&gates);
    show_circuits(&circuits);
    show_devices(&devices);
    show_simulation(&simulation);

    println!();
    print_success("Basics tour complete!");
    Ok(())
}
