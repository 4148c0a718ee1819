//! Ketline Demo Suite
//!
//! Guided tours of the circuit model and the simulator:
//!
//! - **Hello Qubit**: one grid qubit, a power of X, a measurement, 20 samples
//! - **Basics**: qubits, gates, moments, device constraints and simulation
//!
//! Each tour step is a library function returning what it built, so the
//! binaries only print and the tests can inspect the same values.

pub mod tour;

use clap::Args;
use console::style;
use tracing_subscriber::EnvFilter;

/// Flags shared by every demo binary.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Seed for the simulator RNG (random when omitted)
    #[arg(long, env = "KETLINE_SEED")]
    pub seed: Option<u64>,

    /// Print sampled results as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Install the tracing subscriber for a `-v` count.
pub fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a multi-line block (a circuit or device drawing) as-is.
pub fn print_block(label: &str, block: impl std::fmt::Display) {
    println!("{}", style(format!("{label}:")).dim());
    println!("{block}");
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("✗").yellow().bold(), message);
}
