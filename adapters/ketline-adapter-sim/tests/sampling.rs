//! Integration tests for sampling behaviour.

use ketline_adapter_sim::{SimError, Simulator};
use ketline_ir::ops::{cnot, h, measure, x};
use ketline_ir::{Circuit, Gate, GridQubit, LineQubit, NamedQubit};
use proptest::prelude::*;

#[test]
fn test_ghz_only_all_zero_or_all_one() {
    let mut circuit = Circuit::ghz(3).unwrap();
    circuit
        .push(measure(LineQubit::range(3), Some("ghz")).unwrap())
        .unwrap();

    let result = Simulator::with_seed(17).run(&circuit, 500).unwrap();
    let hist = result.histogram("ghz").unwrap();
    assert_eq!(hist.get(0b000) + hist.get(0b111), 500);
    assert_eq!(hist.len(), 2);
}

#[test]
fn test_separate_keys_are_independent_columns() {
    let (a, b) = (LineQubit(0), LineQubit(1));
    let circuit = Circuit::from_ops([
        x(a),
        measure([a], Some("a")).unwrap(),
        measure([b], Some("b")).unwrap(),
    ])
    .unwrap();

    let result = Simulator::with_seed(1).run(&circuit, 5).unwrap();
    assert_eq!(result.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(result.to_string(), "a=11111\nb=00000");
}

#[test]
fn test_default_key_from_qubits() {
    let (q0, q1) = (LineQubit(0), LineQubit(1));
    let circuit = Circuit::from_ops([
        h(q0),
        cnot(q0, q1).unwrap(),
        measure([q0, q1], None).unwrap(),
    ])
    .unwrap();

    let result = Simulator::with_seed(4).run(&circuit, 10).unwrap();
    assert_eq!(result.keys().collect::<Vec<_>>(), vec!["0,1"]);
    for row in result.measurements("0,1").unwrap() {
        assert_eq!(row[0], row[1]);
    }
}

#[test]
fn test_measurement_order_follows_operation() {
    // Measuring [b, a] puts b in the high bit.
    let (a, b) = (NamedQubit::new("a"), NamedQubit::new("b"));
    let circuit = Circuit::from_ops([
        x(a.clone()),
        measure([b, a], Some("m")).unwrap(),
    ])
    .unwrap();

    let hist = Simulator::with_seed(0)
        .run(&circuit, 8)
        .unwrap()
        .histogram("m")
        .unwrap();
    assert_eq!(hist.get(0b01), 8);
}

#[test]
fn test_unknown_key_is_an_error() {
    let q = GridQubit::new(0, 0);
    let circuit = Circuit::from_ops([measure([q], Some("m1")).unwrap()]).unwrap();
    let result = Simulator::with_seed(0).run(&circuit, 3).unwrap();

    assert!(matches!(
        result.measurements("m2"),
        Err(SimError::UnknownMeasurementKey(_))
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn x_power_preserves_norm(exponent in -2.0f64..2.0, n in 1i32..=4) {
        let mut circuit = Circuit::new();
        for q in LineQubit::range(n) {
            circuit.push(Gate::x_pow(exponent).on([q]).unwrap()).unwrap();
            circuit.push(Gate::z_pow(exponent / 2.0).on([q]).unwrap()).unwrap();
        }
        let state = Simulator::with_seed(0).simulate(&circuit).unwrap();
        prop_assert!((state.final_state().norm() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn run_yields_one_row_per_repetition(repetitions in 0usize..200, seed in any::<u64>()) {
        let q = LineQubit(0);
        let circuit = Circuit::from_ops([h(q), measure([q], Some("m")).unwrap()]).unwrap();
        let result = Simulator::with_seed(seed).run(&circuit, repetitions).unwrap();

        prop_assert_eq!(result.repetitions(), repetitions);
        prop_assert_eq!(result.measurements("m").unwrap().len(), repetitions);
        prop_assert_eq!(result.histogram("m").unwrap().total(), repetitions);
    }
}

#[test]
fn test_malformed_operations_never_reach_the_simulator() {
    use ketline_ir::{Moment, Operation};

    // A one-qubit CNOT is refused while decoding, so no circuit can carry it.
    let cnot_on_one = r#"{"gate":{"Pow":{"family":"CNot","exponent":1.0}},"qubits":[{"Line":0}]}"#;
    assert!(serde_json::from_str::<Operation>(cnot_on_one).is_err());

    // A decoded moment round-trips and simulates like the one it came from.
    let moment = Moment::new([h(LineQubit(0)), x(LineQubit(1))]).unwrap();
    let decoded: Moment = serde_json::from_str(&serde_json::to_string(&moment).unwrap()).unwrap();
    let circuit = Circuit::from_moments([decoded]).unwrap();
    let state = Simulator::with_seed(0).simulate(&circuit).unwrap();
    assert_eq!(state.dirac_notation(), "0.707|01⟩ + 0.707|11⟩");
}
