use std::path::PathBuf;

use gemfall_core::Move;
use gemfall_engine::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("unknown level {0:?}")]
    UnknownLevel(String),
    #[error("recorded field differs from the field rebuilt from its token sequence")]
    FieldMismatch,
    #[error("move #{index} ({mv}) cannot be replayed: {reason}")]
    InvalidMove {
        index: usize,
        mv: Move,
        #[source]
        reason: EngineError,
    },
    #[error(
        "replay finished at score {actual_score} turn {actual_turn}, \
         recorded score {expected_score:?} turn {expected_turn:?}"
    )]
    ScoreMismatch {
        expected_score: Option<u32>,
        expected_turn: Option<u32>,
        actual_score: u32,
        actual_turn: u32,
    },
}

impl AnalysisError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalysisError::Io {
            path: path.into(),
            source,
        }
    }
}
