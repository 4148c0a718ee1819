//! The basics tour: qubits, gates, circuits, devices and simulation.

use ketline_adapter_sim::{Histogram, RunResult, Simulator, StateVectorTrialResult};
use ketline_ir::ops::{cnot, cz, h, measure, swap, z};
use ketline_ir::{
    Circuit, DeviceError, Gate, GridDevice, GridQubit, InsertStrategy, IrError, IrResult,
    LineQubit, Moment, NamedQubit, Operation,
};
use tracing::debug;

/// Repetitions used when sampling the Bell circuit.
pub const BELL_REPETITIONS: usize = 1024;

/// Measurement key of the sampled Bell circuit.
pub const BELL_KEY: &str = "result";

/// Qubit identifiers of every kind, and a device to place them on.
#[derive(Debug)]
pub struct QubitTour {
    pub source: NamedQubit,
    pub target: NamedQubit,
    pub line: LineQubit,
    pub line_range: Vec<LineQubit>,
    pub grid: GridQubit,
    pub square: Vec<GridQubit>,
    pub foxtail: GridDevice,
}

pub fn qubits() -> QubitTour {
    QubitTour {
        source: NamedQubit::new("source"),
        target: NamedQubit::new("target"),
        line: LineQubit(3),
        line_range: LineQubit::range(3),
        grid: GridQubit::new(4, 5),
        square: GridQubit::square(4),
        foxtail: GridDevice::foxtail(),
    }
}

/// Gates on their own, and gates applied to qubits.
#[derive(Debug)]
pub struct GateTour {
    pub gates: Vec<Gate>,
    pub operations: Vec<Operation>,
}

pub fn gates_and_operations() -> IrResult<GateTour> {
    let gates = vec![Gate::CNOT, Gate::Z, Gate::X.pow(0.5)?, Gate::y_pow(0.25)];

    let q = LineQubit::range(2);
    let operations = vec![
        z(q[0]),
        cnot(q[0], q[1])?,
        Gate::SQRT_ISWAP.on([q[0], q[1]])?,
    ];
    Ok(GateTour { gates, operations })
}

/// Three ways operations end up in moments.
#[derive(Debug)]
pub struct CircuitTour {
    /// Hadamards on three qubits, packed into one moment.
    pub hadamard_layer: Circuit,
    /// Overlapping SWAPs, one per moment.
    pub swap_chain: Circuit,
    /// One Hadamard per explicit moment.
    pub explicit_moments: Circuit,
}

pub fn circuits_and_moments() -> IrResult<CircuitTour> {
    let mut hadamard_layer = Circuit::new();
    hadamard_layer.append(LineQubit::range(3).into_iter().map(h), InsertStrategy::Earliest)?;

    let swap_chain = Circuit::from_ops(
        LineQubit::range(3)
            .into_iter()
            .map(|q| swap(q, q + 1))
            .collect::<IrResult<Vec<_>>>()?,
    )?;

    let explicit_moments = Circuit::from_moments(
        LineQubit::range(3)
            .into_iter()
            .map(|q| Moment::new([h(q)]))
            .collect::<IrResult<Vec<_>>>()?,
    )?;

    Ok(CircuitTour {
        hadamard_layer,
        swap_chain,
        explicit_moments,
    })
}

/// The same two CZs with and without a device.
#[derive(Debug)]
pub struct DeviceTour {
    /// No device: both the adjacent and non-adjacent CZ are accepted.
    pub free_circuit: Circuit,
    /// Foxtail: holds only the adjacent CZ.
    pub foxtail_circuit: Circuit,
    /// Why Foxtail refused the non-adjacent CZ.
    pub rejection: Option<DeviceError>,
}

pub fn devices() -> IrResult<DeviceTour> {
    let (q0, q1, q2) = (
        GridQubit::new(0, 0),
        GridQubit::new(0, 1),
        GridQubit::new(0, 2),
    );
    let adjacent = cz(q0, q1)?;
    let nonadjacent = cz(q0, q2)?;

    let mut free_circuit = Circuit::new();
    free_circuit.push(adjacent.clone())?;
    free_circuit.push(nonadjacent.clone())?;

    let mut foxtail_circuit = Circuit::with_device(GridDevice::foxtail());
    foxtail_circuit.push(adjacent)?;
    let rejection = match foxtail_circuit.push(nonadjacent) {
        Ok(_) => None,
        Err(IrError::Device(e)) => {
            debug!("Foxtail rejected operation: {e}");
            Some(e)
        }
        Err(e) => return Err(e),
    };

    Ok(DeviceTour {
        free_circuit,
        foxtail_circuit,
        rejection,
    })
}

/// A Bell pair, simulated exactly and then sampled.
#[derive(Debug)]
pub struct SimulationTour {
    pub bell: Circuit,
    pub state: StateVectorTrialResult,
    pub sampled: RunResult,
    pub histogram: Histogram,
}

pub fn simulation(sim: &mut Simulator, repetitions: usize) -> anyhow::Result<SimulationTour> {
    let q = LineQubit::range(2);
    let mut bell = Circuit::new();
    bell.push(h(q[0]))?;
    bell.push(cnot(q[0], q[1])?)?;

    let state = sim.simulate(&bell)?;

    bell.push(measure([q[0], q[1]], Some(BELL_KEY))?)?;
    let sampled = sim.run(&bell, repetitions)?;
    let histogram = sampled.histogram(BELL_KEY)?;

    Ok(SimulationTour {
        bell,
        state,
        sampled,
        histogram,
    })
}
