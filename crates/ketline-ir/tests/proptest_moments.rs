//! Property-based tests for moment packing.
//!
//! Whatever order operations arrive in, a circuit must keep every moment
//! free of shared qubits and must preserve the per-qubit operation order.

use ketline_ir::ops::{cnot, h, swap, x};
use ketline_ir::{Circuit, InsertStrategy, LineQubit, Operation, Qubit};
use proptest::prelude::*;
use std::collections::HashSet;

/// Gate operations that can be applied to a circuit.
#[derive(Debug, Clone)]
enum GateOp {
    H(i32),
    X(i32),
    CNot(i32, i32),
    Swap(i32, i32),
}

impl GateOp {
    fn to_operation(&self) -> Operation {
        match *self {
            GateOp::H(q) => h(LineQubit(q)),
            GateOp::X(q) => x(LineQubit(q)),
            GateOp::CNot(a, b) => cnot(LineQubit(a), LineQubit(b)).unwrap(),
            GateOp::Swap(a, b) => swap(LineQubit(a), LineQubit(b)).unwrap(),
        }
    }
}

fn arb_gate_op(num_qubits: i32) -> impl Strategy<Value = GateOp> {
    let pair = (0..num_qubits, 0..num_qubits).prop_filter("distinct qubits", |(a, b)| a != b);
    prop_oneof![
        (0..num_qubits).prop_map(GateOp::H),
        (0..num_qubits).prop_map(GateOp::X),
        pair.clone().prop_map(|(a, b)| GateOp::CNot(a, b)),
        pair.prop_map(|(a, b)| GateOp::Swap(a, b)),
    ]
}

fn arb_ops() -> impl Strategy<Value = Vec<GateOp>> {
    (2_i32..=6).prop_flat_map(|n| prop::collection::vec(arb_gate_op(n), 1..=25))
}

fn arb_strategy() -> impl Strategy<Value = InsertStrategy> {
    prop_oneof![
        Just(InsertStrategy::Earliest),
        Just(InsertStrategy::New),
        Just(InsertStrategy::Inline),
        Just(InsertStrategy::NewThenInline),
    ]
}

/// The sequence of operations touching each qubit, in circuit order.
fn per_qubit_history(ops: impl IntoIterator<Item = Operation>) -> Vec<(Qubit, Vec<String>)> {
    let mut history: Vec<(Qubit, Vec<String>)> = vec![];
    for op in ops {
        for q in op.qubits() {
            match history.iter_mut().find(|(k, _)| k == q) {
                Some((_, seen)) => seen.push(op.to_string()),
                None => history.push((q.clone(), vec![op.to_string()])),
            }
        }
    }
    history.sort_by(|a, b| a.0.cmp(&b.0));
    history
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn moments_never_share_qubits(ops in arb_ops(), strategy in arb_strategy()) {
        let mut circuit = Circuit::new();
        circuit.append(ops.iter().map(GateOp::to_operation), strategy).unwrap();

        for moment in circuit.moments() {
            let mut seen = HashSet::new();
            for q in moment.qubits() {
                prop_assert!(seen.insert(q.clone()), "qubit {} used twice in a moment", q);
            }
        }
        prop_assert_eq!(circuit.num_operations(), ops.len());
    }

    #[test]
    fn packing_preserves_qubit_order(ops in arb_ops(), strategy in arb_strategy()) {
        let mut circuit = Circuit::new();
        circuit.append(ops.iter().map(GateOp::to_operation), strategy).unwrap();

        let placed = per_qubit_history(circuit.all_operations().cloned());
        let given = per_qubit_history(ops.iter().map(GateOp::to_operation));
        prop_assert_eq!(placed, given);
    }

    #[test]
    fn earliest_is_never_deeper_than_new(ops in arb_ops()) {
        let earliest = Circuit::from_ops(ops.iter().map(GateOp::to_operation)).unwrap();
        let mut new = Circuit::new();
        new.append(ops.iter().map(GateOp::to_operation), InsertStrategy::New).unwrap();

        prop_assert!(earliest.depth() <= new.depth());
        prop_assert_eq!(new.depth(), ops.len());
    }
}

#[test]
fn operation_serializes_to_json() {
    let op = cnot(LineQubit(0), LineQubit(1)).unwrap();
    let json = serde_json::to_string(&op).unwrap();
    let back: Operation = serde_json::from_str(&json).unwrap();
    assert_eq!(back, op);
}
