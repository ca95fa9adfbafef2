//! One-ply lookahead: simulate every legal move through its cascades.

use std::cmp::Reverse;

use gemfall_core::Move;
use gemfall_engine::{drain_cascades, generate_moves, EngineError, Grid, MoveList};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::trace;

/// Apply `mv` to a private copy of the grid, drain every cascade and return
/// the resulting cumulative score. `grid` itself is never touched.
pub fn simulate_move(grid: &Grid, mv: Move) -> Result<u32, EngineError> {
    let mut next = grid.clone();
    next.apply_move(mv);
    drain_cascades(&mut next)?;
    Ok(next.score())
}

#[derive(Clone, Copy, Debug)]
pub struct LookaheadSearch {
    /// Evaluate candidates on the rayon pool. Results are identical either way.
    pub parallel: bool,
}

impl LookaheadSearch {
    pub fn new(parallel: bool) -> Self {
        Self { parallel }
    }

    /// Every legal move with its simulated post-cascade score, in enumeration
    /// order regardless of how the evaluations were scheduled.
    pub fn score_moves(&self, grid: &Grid) -> Result<Vec<(Move, u32)>, EngineError> {
        self.score_candidates(grid, &generate_moves(grid))
    }

    /// Score an already enumerated candidate list, keeping its order.
    pub fn score_candidates(
        &self,
        grid: &Grid,
        moves: &MoveList,
    ) -> Result<Vec<(Move, u32)>, EngineError> {
        #[cfg(feature = "rayon")]
        if self.parallel {
            return moves
                .as_slice()
                .par_iter()
                .map(|&mv| simulate_move(grid, mv).map(|score| (mv, score)))
                .collect();
        }

        moves
            .iter()
            .map(|&mv| simulate_move(grid, mv).map(|score| (mv, score)))
            .collect()
    }

    /// The move with the highest simulated score; ties go to the last one
    /// enumerated.
    pub fn find_best_move(&self, grid: &Grid) -> Result<Option<(Move, u32)>, EngineError> {
        self.best_of(grid, &generate_moves(grid))
    }

    pub fn best_of(
        &self,
        grid: &Grid,
        moves: &MoveList,
    ) -> Result<Option<(Move, u32)>, EngineError> {
        let scored = self.score_candidates(grid, moves)?;
        let best = last_maximum(&scored);
        if let Some((mv, score)) = best {
            trace!(%mv, score, candidates = scored.len(), "lookahead pick");
        }
        Ok(best)
    }

    /// Candidates ordered best first; equal scores keep enumeration order.
    pub fn ranked_moves(&self, grid: &Grid) -> Result<Vec<(Move, u32)>, EngineError> {
        let mut scored = self.score_moves(grid)?;
        scored.sort_by_key(|&(_, score)| Reverse(score));
        Ok(scored)
    }
}

impl Default for LookaheadSearch {
    fn default() -> Self {
        Self {
            parallel: cfg!(feature = "rayon"),
        }
    }
}

/// Baseline of zero with no move, then `>=` over every candidate. Scores are
/// never negative, so the first candidate always takes the lead.
fn last_maximum(scored: &[(Move, u32)]) -> Option<(Move, u32)> {
    let mut best_score = 0;
    let mut best = None;
    for &(mv, score) in scored {
        if score >= best_score {
            best_score = score;
            best = Some((mv, score));
        }
    }
    best
}
