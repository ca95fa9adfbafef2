//! Gemfall core crate - fundamental types for the match-3 engine.

mod level;
mod moves;
mod token;

pub use level::LevelProfile;
pub use moves::{Coord, Move};
pub use token::{Token, TokenError};

/// Side length of the square grid.
pub const GRID_SIZE: usize = 9;

/// Shortest run that explodes.
pub const MIN_EXPLODE: usize = 3;

/// Length of a generated token stream before it wraps.
pub const TOKEN_STREAM_LEN: usize = 1000;

/// Row-major cell matrix, indexed `[y][x]`.
pub type Cells = [[Token; GRID_SIZE]; GRID_SIZE];
