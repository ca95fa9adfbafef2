use gemfall_core::{Coord, Move, TokenError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("level profile {0:?} has no positive spawn weight")]
    InvalidProfile(String),

    #[error("token sequence is empty")]
    EmptyTokenSequence,

    #[error("token sequence holds an empty cell at index {index}")]
    EmptyTokenInSequence { index: usize },

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("grid must be {expected}x{expected}, found {rows} rows / {cols} columns")]
    GridSizeMismatch {
        expected: usize,
        rows: usize,
        cols: usize,
    },

    #[error("coordinate {0} is outside the grid")]
    OutOfBounds(Coord),

    #[error("cells of move {0} are not 4-neighbors")]
    NotAdjacent(Move),

    #[error("move {0} does not produce a match")]
    NoMatch(Move),

    #[error("cascade did not settle after {steps} steps")]
    CascadeOverflow { steps: usize },
}
