//! Single-cell cost heuristic.

use gemfall_core::Move;
use gemfall_engine::{Grid, MoveList};

/// The move whose source cell holds the most valuable gem. Ties go to the
/// last enumerated move with that cost.
pub fn highest_cost_move(grid: &Grid, moves: &MoveList) -> Option<Move> {
    let mut iter = moves.iter().copied();
    let mut best = iter.next()?;
    for mv in iter {
        if grid.cost_at(mv.from) >= grid.cost_at(best.from) {
            best = mv;
        }
    }
    Some(best)
}
