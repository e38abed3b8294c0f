//! Lattice coordinates and the Moore neighbourhood

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A cell coordinate on the lattice.
///
/// Two positions with the same `(x, y)` are the same key everywhere. The
/// representable lattice is `i64 x i64`; there is nothing beyond its edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The surrounding positions, diagonals included.
    ///
    /// Always 8 away from the `i64` limits. On an edge row or column the
    /// positions that would fall off the lattice are left out.
    pub fn neighbours(&self) -> HashSet<Position> {
        self.neighbour_iter().collect()
    }

    /// Same positions as [`Position::neighbours`] without allocating a set.
    pub fn neighbour_iter(&self) -> impl Iterator<Item = Position> {
        let Position { x, y } = *self;
        (-1i64..=1)
            .cartesian_product(-1i64..=1)
            .filter(|&offset| offset != (0, 0))
            .filter_map(move |(dx, dy)| {
                Some(Position::new(x.checked_add(dx)?, y.checked_add(dy)?))
            })
    }
}

impl From<(i64, i64)> for Position {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
