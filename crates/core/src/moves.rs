//! Grid coordinates and swap moves.

use serde::{Deserialize, Serialize};

/// A cell position. `x` is the column, `y` the row; row 0 is the top.
///
/// Signed so that out-of-bounds requests coming from a shell are representable
/// and can be rejected rather than wrapped.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
#[serde(from = "(i8, i8)", into = "(i8, i8)")]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl Coord {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Taxicab distance. Widened so any pair of `i8` coordinates fits.
    #[inline]
    pub fn manhattan(self, other: Coord) -> u16 {
        (self.x as i16 - other.x as i16).unsigned_abs()
            + (self.y as i16 - other.y as i16).unsigned_abs()
    }

    #[inline]
    pub fn right(self) -> Self {
        Self::new(self.x + 1, self.y)
    }

    #[inline]
    pub fn down(self) -> Self {
        Self::new(self.x, self.y + 1)
    }
}

impl From<(i8, i8)> for Coord {
    fn from((x, y): (i8, i8)) -> Self {
        Self { x, y }
    }
}

impl From<Coord> for (i8, i8) {
    fn from(c: Coord) -> Self {
        (c.x, c.y)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A swap of two cells. Recorded sessions store it as `[[x, y], [x, y]]`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(from = "(Coord, Coord)", into = "(Coord, Coord)")]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

impl Move {
    pub const fn new(from: Coord, to: Coord) -> Self {
        Self { from, to }
    }

    /// Shorthand for `Move::new(Coord::new(ax, ay), Coord::new(bx, by))`.
    pub const fn cells(ax: i8, ay: i8, bx: i8, by: i8) -> Self {
        Self::new(Coord::new(ax, ay), Coord::new(bx, by))
    }

    /// True when the two cells are 4-neighbors.
    #[inline]
    pub fn is_adjacent(&self) -> bool {
        self.from.manhattan(self.to) == 1
    }

    pub fn reversed(self) -> Self {
        Self::new(self.to, self.from)
    }
}

impl From<(Coord, Coord)> for Move {
    fn from((from, to): (Coord, Coord)) -> Self {
        Self { from, to }
    }
}

impl From<Move> for (Coord, Coord) {
    fn from(m: Move) -> Self {
        (m.from, m.to)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <-> {}", self.from, self.to)
    }
}
