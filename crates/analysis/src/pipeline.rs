use gemfall_core::Move;
use serde::Serialize;
use tracing::info;

use crate::error::AnalysisError;
use crate::missed::{grade_move, missed_from_grade, MissedMove, MoveGrade};
use crate::session::SessionRecord;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct SessionStats {
    pub moves: u32,
    pub missed: u32,
    pub final_score: u32,
    pub cascade_steps: u32,
    pub longest_chain: u32,
    pub think_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReview {
    pub stats: SessionStats,
    pub missed: Vec<MissedMove>,
    /// Share of the lookahead's available points the player actually took,
    /// 0 to 100.
    pub accuracy: f32,
}

/// Replay a recorded session and grade each move against the lookahead.
pub fn review_session(record: &SessionRecord) -> Result<SessionReview, AnalysisError> {
    let mut grades = Vec::with_capacity(record.moves.len());
    let mut missed = Vec::new();
    let outcome = record.replay_with(|_, grid, mv: Move| {
        let grade = grade_move(grid, mv)?;
        missed.extend(missed_from_grade(grid.turn(), &grade));
        grades.push(grade);
        Ok(())
    })?;

    let stats = SessionStats {
        moves: record.moves.len() as u32,
        missed: missed.len() as u32,
        final_score: outcome.grid.score(),
        cascade_steps: outcome.cascades.iter().map(|c| c.steps as u32).sum(),
        longest_chain: outcome
            .cascades
            .iter()
            .map(|c| c.steps as u32)
            .max()
            .unwrap_or(0),
        think_seconds: record.total_time(),
    };
    let accuracy = calculate_accuracy(&grades);
    info!(name = %record.name, moves = stats.moves, missed = stats.missed, accuracy, "session reviewed");

    Ok(SessionReview {
        stats,
        missed,
        accuracy,
    })
}

/// Points gained over points available. Sessions where the lookahead could
/// gain nothing count as perfect.
fn calculate_accuracy(grades: &[MoveGrade]) -> f32 {
    let available: u32 = grades.iter().map(MoveGrade::best_gain).sum();
    if available == 0 {
        return 100.0;
    }
    let taken: u32 = grades.iter().map(MoveGrade::player_gain).sum();
    100.0 * taken as f32 / available as f32
}
