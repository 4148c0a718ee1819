//! Qubit identifiers.
//!
//! Qubits carry no state. They are keys that gate operations address, and
//! their total order decides row order in diagrams and basis order in the
//! simulator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// A qubit identified by an arbitrary name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NamedQubit(String);

impl NamedQubit {
    /// Create a named qubit.
    pub fn new(name: impl Into<String>) -> Self {
        NamedQubit(name.into())
    }

    /// Get the name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NamedQubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A qubit at an integer position on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineQubit(pub i32);

impl LineQubit {
    /// Create a line qubit.
    pub fn new(x: i32) -> Self {
        LineQubit(x)
    }

    /// The qubits `0..n`.
    pub fn range(n: i32) -> Vec<LineQubit> {
        Self::range_from(0, n)
    }

    /// The qubits `start..stop`.
    pub fn range_from(start: i32, stop: i32) -> Vec<LineQubit> {
        (start..stop).map(LineQubit).collect()
    }

    /// Position on the line.
    pub fn x(&self) -> i32 {
        self.0
    }

    /// Check whether the other qubit is a direct neighbour on the line.
    pub fn is_adjacent(&self, other: &LineQubit) -> bool {
        (self.0 - other.0).abs() == 1
    }
}

impl Add<i32> for LineQubit {
    type Output = LineQubit;

    fn add(self, rhs: i32) -> LineQubit {
        LineQubit(self.0 + rhs)
    }
}

impl fmt::Display for LineQubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for LineQubit {
    fn from(x: i32) -> Self {
        LineQubit(x)
    }
}

/// A qubit at a coordinate on a 2D grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridQubit {
    /// Row index.
    pub row: i32,
    /// Column index.
    pub col: i32,
}

impl GridQubit {
    /// Create a grid qubit.
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The `n * n` qubits from `(0, 0)` to `(n - 1, n - 1)` in row-major order.
    pub fn square(n: i32) -> Vec<GridQubit> {
        Self::rect(n, n)
    }

    /// The `rows * cols` qubits with top-left corner at the origin, row-major.
    pub fn rect(rows: i32, cols: i32) -> Vec<GridQubit> {
        (0..rows)
            .flat_map(|row| (0..cols).map(move |col| GridQubit { row, col }))
            .collect()
    }

    /// Check whether the other qubit is a nearest neighbour (Manhattan distance 1).
    pub fn is_adjacent(&self, other: &GridQubit) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

impl fmt::Display for GridQubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Any qubit identifier.
///
/// The derived order puts named qubits first, then line qubits, then grid
/// qubits. Within each kind the natural order of the identifier applies.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Qubit {
    /// A named qubit.
    Named(NamedQubit),
    /// A line qubit.
    Line(LineQubit),
    /// A grid qubit.
    Grid(GridQubit),
}

impl Qubit {
    /// Shorthand for a named qubit.
    pub fn named(name: impl Into<String>) -> Self {
        Qubit::Named(NamedQubit::new(name))
    }

    /// Shorthand for a line qubit.
    pub fn line(x: i32) -> Self {
        Qubit::Line(LineQubit(x))
    }

    /// Shorthand for a grid qubit.
    pub fn grid(row: i32, col: i32) -> Self {
        Qubit::Grid(GridQubit::new(row, col))
    }

    /// The grid coordinate, if this is a grid qubit.
    pub fn as_grid(&self) -> Option<GridQubit> {
        match self {
            Qubit::Grid(q) => Some(*q),
            _ => None,
        }
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Qubit::Named(q) => q.fmt(f),
            Qubit::Line(q) => q.fmt(f),
            Qubit::Grid(q) => q.fmt(f),
        }
    }
}

impl From<NamedQubit> for Qubit {
    fn from(q: NamedQubit) -> Self {
        Qubit::Named(q)
    }
}

impl From<LineQubit> for Qubit {
    fn from(q: LineQubit) -> Self {
        Qubit::Line(q)
    }
}

impl From<GridQubit> for Qubit {
    fn from(q: GridQubit) -> Self {
        Qubit::Grid(q)
    }
}

impl From<&NamedQubit> for Qubit {
    fn from(q: &NamedQubit) -> Self {
        Qubit::Named(q.clone())
    }
}

impl From<&LineQubit> for Qubit {
    fn from(q: &LineQubit) -> Self {
        Qubit::Line(*q)
    }
}

impl From<&GridQubit> for Qubit {
    fn from(q: &GridQubit) -> Self {
        Qubit::Grid(*q)
    }
}

impl From<&Qubit> for Qubit {
    fn from(q: &Qubit) -> Self {
        q.clone()
    }
}
