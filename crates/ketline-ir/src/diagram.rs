//! Text diagrams of circuits.
//!
//! One wire per qubit, in sorted qubit order, with one column per moment:
//!
//! ```text
//! (0, 0): ───@───@───
//!            │   │
//! (0, 1): ───@───┼───
//!                │
//! (0, 2): ───────@───
//! ```
//!
//! A moment whose multi-qubit operations would overlap vertically is split
//! into several columns so that connectors never cross each other.

use rustc_hash::FxHashMap;

use crate::circuit::Circuit;
use crate::qubit::Qubit;

const WIRE: char = '─';
const GAP: &str = "───";

/// One drawn column: a symbol per wire plus the vertical spans of its operations.
struct Column {
    cells: Vec<Option<String>>,
    spans: Vec<(usize, usize)>,
}

impl Column {
    fn new(rows: usize) -> Self {
        Self {
            cells: vec![None; rows],
            spans: vec![],
        }
    }

    fn has_room(&self, lo: usize, hi: usize) -> bool {
        self.spans.iter().all(|&(a, b)| hi < a || b < lo)
    }

    fn width(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0)
            .max(1)
    }

    /// Check if a connector passes through the wire at `row`.
    fn crosses(&self, row: usize) -> bool {
        self.spans.iter().any(|&(a, b)| a < row && row < b)
    }

    /// Check if a connector joins `row` and `row + 1`.
    fn joins(&self, row: usize) -> bool {
        self.spans.iter().any(|&(a, b)| a <= row && row < b)
    }
}

/// Render a circuit as a text diagram.
pub(crate) fn render(circuit: &Circuit) -> String {
    let qubits = circuit.all_qubits();
    if qubits.is_empty() {
        return String::new();
    }
    let rows: FxHashMap<&Qubit, usize> = qubits.iter().enumerate().map(|(i, q)| (q, i)).collect();

    let mut columns: Vec<Column> = vec![];
    for moment in circuit.moments() {
        let mut group: Vec<Column> = vec![];
        for op in moment.operations() {
            let wires: Vec<usize> = op.qubits().iter().map(|q| rows[q]).collect();
            let lo = wires.iter().copied().min().unwrap_or(0);
            let hi = wires.iter().copied().max().unwrap_or(0);

            let slot = match group.iter().position(|c| c.has_room(lo, hi)) {
                Some(i) => i,
                None => {
                    group.push(Column::new(qubits.len()));
                    group.len() - 1
                }
            };
            let column = &mut group[slot];
            for (wire, symbol) in wires.iter().zip(op.wire_symbols()) {
                column.cells[*wire] = Some(symbol);
            }
            column.spans.push((lo, hi));
        }
        if group.is_empty() {
            group.push(Column::new(qubits.len()));
        }
        columns.extend(group);
    }

    let labels: Vec<String> = qubits.iter().map(|q| format!("{q}: ")).collect();
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let widths: Vec<usize> = columns.iter().map(Column::width).collect();

    let mut lines = Vec::with_capacity(2 * qubits.len());
    for (row, label) in labels.iter().enumerate() {
        let mut line = label.clone();
        line.extend(std::iter::repeat_n(WIRE, label_width - label.chars().count()));
        for (column, &width) in columns.iter().zip(&widths) {
            line.push_str(GAP);
            let symbol = match &column.cells[row] {
                Some(s) => s.clone(),
                None if column.crosses(row) => "┼".to_string(),
                None => String::new(),
            };
            let pad = width - symbol.chars().count();
            line.push_str(&symbol);
            line.extend(std::iter::repeat_n(WIRE, pad));
        }
        line.push_str(GAP);
        lines.push(line);

        if row + 1 < qubits.len() {
            let mut spacer = " ".repeat(label_width);
            for (column, &width) in columns.iter().zip(&widths) {
                spacer.push_str("   ");
                spacer.push(if column.joins(row) { '│' } else { ' ' });
                spacer.push_str(&" ".repeat(width - 1));
            }
            lines.push(spacer.trim_end().to_string());
        }
    }

    lines.join("\n")
}
