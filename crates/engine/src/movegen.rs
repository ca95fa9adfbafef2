//! Legal move enumeration for a settled grid.

use gemfall_core::{Coord, Move, GRID_SIZE};
use tracing::trace;

use crate::move_list::MoveList;
use crate::Grid;

/// Every adjacent swap that produces an immediate match.
///
/// Scans every cell outside the last row and column, row-major, testing the
/// right neighbor before the lower one. Selection policies depend on this
/// order.
pub fn generate_moves(grid: &Grid) -> MoveList {
    let mut moves = MoveList::new();
    for_each_candidate(|mv| {
        if grid.can_swap(mv.from, mv.to) {
            moves.push(mv);
        }
        true
    });
    trace!(count = moves.len(), "moves generated");
    moves
}

/// Stops at the first legal move; cheaper than a full enumeration for
/// game-over checks.
pub fn has_any_move(grid: &Grid) -> bool {
    let mut found = false;
    for_each_candidate(|mv| {
        found = grid.can_swap(mv.from, mv.to);
        !found
    });
    found
}

/// Number of legal moves, without keeping them.
pub fn count_moves(grid: &Grid) -> usize {
    let mut count = 0;
    for_each_candidate(|mv| {
        count += grid.can_swap(mv.from, mv.to) as usize;
        true
    });
    count
}

/// Visit candidate pairs in enumeration order until `f` returns false.
///
/// Sources on the last row or column are never visited, so swaps along the
/// bottom row or the right column are not candidates.
fn for_each_candidate(mut f: impl FnMut(Move) -> bool) {
    let last = GRID_SIZE as i8 - 1;
    for y in 0..last {
        for x in 0..last {
            let here = Coord::new(x, y);
            if !f(Move::new(here, here.right())) || !f(Move::new(here, here.down())) {
                return;
            }
        }
    }
}
