//! gemfall-analysis - session records, replay and strategy comparison.

mod compare;
mod config;
mod error;
mod missed;
mod pipeline;
mod session;

pub use compare::{
    compare_strategies, mean_and_stddev, play_game, ComparisonReport, GameResult, StrategyStats,
};
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use missed::{
    detect_missed_move, grade_move, MissSeverity, MissedMove, MoveGrade, MISS_THRESHOLD,
};
pub use pipeline::{review_session, SessionReview, SessionStats};
pub use session::{ReplayOutcome, SessionRecord, SessionRecorder};
