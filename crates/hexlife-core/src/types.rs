//! Board coordinates and hex adjacency.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Neighbor offsets `(dx, dy)` for a cell in an even column.
pub const EVEN_COLUMN_OFFSETS: [(i32, i32); 6] = [
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 0),
    (1, -1),
    (1, 0),
];

/// Neighbor offsets `(dx, dy)` for a cell in an odd column.
pub const ODD_COLUMN_OFFSETS: [(i32, i32); 6] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (-1, 1),
    (1, 0),
    (1, 1),
];

/// Offset table for the column `x`. Odd columns sit half a cell lower
/// than even ones, so their side neighbors shift down a row.
pub fn hex_offsets(x: i32) -> &'static [(i32, i32); 6] {
    if x.rem_euclid(2) == 0 {
        &EVEN_COLUMN_OFFSETS
    } else {
        &ODD_COLUMN_OFFSETS
    }
}

/// 2D position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The six candidate neighbors of this position. Candidates may fall
    /// outside any particular board; callers filter them.
    pub fn hex_neighbors(self) -> impl Iterator<Item = Position> {
        hex_offsets(self.x)
            .iter()
            .map(move |&(dx, dy)| self.add(dx, dy))
    }

    /// Whether `other` is one of this position's six hex neighbors.
    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.hex_neighbors().any(|candidate| candidate == *other)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}
