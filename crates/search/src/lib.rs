//! gemfall-search - move selection policies.
//!
//! Five policies share one dispatch: scan-order picks, a uniform random pick,
//! a single-cell cost heuristic and a one-ply lookahead that simulates every
//! candidate through its full cascade.

mod greedy;
mod lookahead;
mod strategy;

pub use greedy::highest_cost_move;
pub use lookahead::{simulate_move, LookaheadSearch};
pub use strategy::{ParseStrategyError, Strategy};
