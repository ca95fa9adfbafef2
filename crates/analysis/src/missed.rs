use gemfall_core::Move;
use gemfall_engine::{EngineError, Grid};
use gemfall_search::{simulate_move, LookaheadSearch};
use serde::Serialize;

use crate::error::AnalysisError;

/// Gaps below this many points are not worth flagging.
pub const MISS_THRESHOLD: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissedMove {
    pub turn: u32,
    pub player_move: Move,
    pub best_move: Move,
    pub player_score: u32,
    pub best_score: u32,
    pub score_gap: u32,
    pub severity: MissSeverity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MissSeverity {
    Minor,
    Moderate,
    Major,
}

/// Lookahead verdict on one move. Scores are absolute post-cascade totals;
/// `base_score` is the score before the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveGrade {
    pub player_move: Move,
    pub best_move: Move,
    pub base_score: u32,
    pub player_score: u32,
    pub best_score: u32,
}

impl MoveGrade {
    pub fn player_gain(&self) -> u32 {
        self.player_score - self.base_score
    }

    pub fn best_gain(&self) -> u32 {
        self.best_score - self.base_score
    }

    pub fn score_gap(&self) -> u32 {
        self.best_score - self.player_score
    }
}

/// Score `player_move` against the lookahead pick on the same grid. The move
/// must be a legal matching swap. A player move the lookahead never
/// considers, or one that beats its pick, is graded as the best move.
pub fn grade_move(grid: &Grid, player_move: Move) -> Result<MoveGrade, AnalysisError> {
    if !grid.validate_move(player_move)? {
        return Err(EngineError::NoMatch(player_move).into());
    }
    let player_score = simulate_move(grid, player_move)?;
    let (best_move, best_score) = match LookaheadSearch::default().find_best_move(grid)? {
        Some((mv, score)) if score >= player_score => (mv, score),
        _ => (player_move, player_score),
    };
    Ok(MoveGrade {
        player_move,
        best_move,
        base_score: grid.score(),
        player_score,
        best_score,
    })
}

/// Flag `player_move` when it fell at least [`MISS_THRESHOLD`] points short
/// of the lookahead pick.
pub fn detect_missed_move(
    grid: &Grid,
    player_move: Move,
) -> Result<Option<MissedMove>, AnalysisError> {
    Ok(missed_from_grade(grid.turn(), &grade_move(grid, player_move)?))
}

pub(crate) fn missed_from_grade(turn: u32, grade: &MoveGrade) -> Option<MissedMove> {
    let score_gap = grade.score_gap();
    if score_gap < MISS_THRESHOLD {
        return None;
    }
    Some(MissedMove {
        turn,
        player_move: grade.player_move,
        best_move: grade.best_move,
        player_score: grade.player_score,
        best_score: grade.best_score,
        score_gap,
        severity: classify_severity(score_gap),
    })
}

fn classify_severity(gap: u32) -> MissSeverity {
    if gap < 10 {
        MissSeverity::Minor
    } else if gap < 25 {
        MissSeverity::Moderate
    } else {
        MissSeverity::Major
    }
}
