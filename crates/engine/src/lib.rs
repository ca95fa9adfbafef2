//! gemfall-engine - match-3 grid simulation.
//!
//! Owns the token stream, match detection, gravity, refill, cascade
//! resolution and legal move enumeration.

mod error;
pub mod gravity;
pub mod grid;
pub mod matches;
pub mod move_list;
pub mod movegen;
pub mod resolve;
pub mod token_stream;

pub use error::EngineError;
pub use gravity::{FallPlan, FallStep};
pub use grid::{Grid, GridSnapshot};
pub use matches::{scan_matches, ClearMask, Run, ScanResult};
pub use move_list::MoveList;
pub use movegen::{count_moves, generate_moves, has_any_move};
pub use resolve::{drain_cascades, CascadeStep, CascadeSummary, MAX_CASCADE_STEPS};
pub use token_stream::TokenStream;
