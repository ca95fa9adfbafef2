//! Move selection policies behind a single tagged dispatch.

use std::fmt;
use std::str::FromStr;

use gemfall_core::Move;
use gemfall_engine::{generate_moves, EngineError, Grid};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::greedy::highest_cost_move;
use crate::lookahead::LookaheadSearch;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// First legal move in scan order.
    First,
    /// Uniform pick; draws from the caller's RNG once.
    Random,
    /// Last legal move in scan order.
    Low,
    /// Most valuable source gem, last one on ties.
    Good,
    /// Best simulated post-cascade score, last one on ties.
    Optimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy {0:?}, expected one of first, random, low, good, optimal")]
pub struct ParseStrategyError(String);

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::First,
        Strategy::Random,
        Strategy::Low,
        Strategy::Good,
        Strategy::Optimal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::First => "first",
            Strategy::Random => "random",
            Strategy::Low => "low",
            Strategy::Good => "good",
            Strategy::Optimal => "optimal",
        }
    }

    /// Pick a move, or `None` when the grid has no legal move. Only the
    /// lookahead can fail, and only on a cascade that never settles.
    pub fn select<R: Rng + ?Sized>(
        self,
        grid: &Grid,
        rng: &mut R,
    ) -> Result<Option<Move>, EngineError> {
        let moves = generate_moves(grid);
        Ok(match self {
            Strategy::First => moves.first(),
            Strategy::Random => moves.as_slice().choose(rng).copied(),
            Strategy::Low => moves.last(),
            Strategy::Good => highest_cost_move(grid, &moves),
            Strategy::Optimal => LookaheadSearch::default()
                .best_of(grid, &moves)?
                .map(|(mv, _)| mv),
        })
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseStrategyError(s.to_string()))
    }
}
