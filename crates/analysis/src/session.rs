//! Recorded sessions: capture, persistence and deterministic replay.
//!
//! A record stores the full token sequence rather than an RNG seed, so a
//! replay rebuilds the exact same start and refills without any randomness.

use std::fs;
use std::path::Path;

use gemfall_core::{LevelProfile, Move, Token};
use gemfall_engine::{drain_cascades, CascadeStep, CascadeSummary, EngineError, Grid};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AnalysisError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub name: String,
    pub level: String,
    /// The whole cyclic token sequence the session drew from.
    pub candidates: Vec<Token>,
    /// Settled starting matrix, row-major.
    pub field: Vec<Vec<Token>>,
    pub moves: Vec<Move>,
    /// Seconds spent on each move; empty for logs that never tracked time.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub times: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_turn: Option<u32>,
}

/// Result of a successful replay.
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    pub grid: Grid,
    /// Cascade outcome of each move, in play order.
    pub cascades: Vec<CascadeSummary>,
}

impl SessionRecord {
    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, AnalysisError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;
        Self::from_json(&text)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AnalysisError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|e| AnalysisError::io(path, e))
    }

    /// Rebuild the settled start from `candidates` and check it against the
    /// recorded field.
    pub fn initial_grid(&self) -> Result<Grid, AnalysisError> {
        let recorded = Grid::cells_from_rows(&self.field)?;
        let grid = Grid::from_tokens(self.candidates.clone())?;
        if grid.cells() != &recorded {
            warn!(name = %self.name, "recorded field diverges from rebuilt field");
            return Err(AnalysisError::FieldMismatch);
        }
        Ok(grid)
    }

    /// Replay every move, calling `visit` with the grid as it stood before
    /// each one. Moves are validated before `visit` sees them.
    pub fn replay_with<F>(&self, mut visit: F) -> Result<ReplayOutcome, AnalysisError>
    where
        F: FnMut(usize, &Grid, Move) -> Result<(), AnalysisError>,
    {
        let mut grid = self.initial_grid()?;
        let mut cascades = Vec::with_capacity(self.moves.len());

        for (index, &mv) in self.moves.iter().enumerate() {
            let reason = match grid.validate_move(mv) {
                Ok(true) => None,
                Ok(false) => Some(EngineError::NoMatch(mv)),
                Err(e) => Some(e),
            };
            if let Some(reason) = reason {
                warn!(index, %mv, %reason, "recorded move is not playable");
                return Err(AnalysisError::InvalidMove { index, mv, reason });
            }
            visit(index, &grid, mv)?;
            grid.apply_move(mv);
            let summary = drain_cascades(&mut grid)?;
            debug!(index, %mv, steps = summary.steps, gained = summary.score, "replayed move");
            cascades.push(summary);
        }

        self.verify_final(&grid)?;
        Ok(ReplayOutcome { grid, cascades })
    }

    pub fn replay(&self) -> Result<ReplayOutcome, AnalysisError> {
        self.replay_with(|_, _, _| Ok(()))
    }

    fn verify_final(&self, grid: &Grid) -> Result<(), AnalysisError> {
        let score_ok = self.final_score.map_or(true, |s| s == grid.score());
        let turn_ok = self.final_turn.map_or(true, |t| t == grid.turn());
        if score_ok && turn_ok {
            return Ok(());
        }
        warn!(
            name = %self.name,
            expected_score = ?self.final_score,
            actual_score = grid.score(),
            "replay diverged from recorded result"
        );
        Err(AnalysisError::ScoreMismatch {
            expected_score: self.final_score,
            expected_turn: self.final_turn,
            actual_score: grid.score(),
            actual_turn: grid.turn(),
        })
    }

    pub fn total_time(&self) -> f64 {
        self.times.iter().sum()
    }
}

/// Drives a live grid and logs every committed move.
#[derive(Debug, Clone)]
pub struct SessionRecorder {
    record: SessionRecord,
    grid: Grid,
}

impl SessionRecorder {
    /// Start recording from a freshly settled grid.
    pub fn new(name: impl Into<String>, level: impl Into<String>, grid: Grid) -> Self {
        let record = SessionRecord {
            name: name.into(),
            level: level.into(),
            candidates: grid.stream().tokens().to_vec(),
            field: grid.rows(),
            moves: Vec::new(),
            times: Vec::new(),
            final_score: None,
            final_turn: None,
        };
        Self { record, grid }
    }

    pub fn from_profile<R: Rng + ?Sized>(
        name: impl Into<String>,
        profile: &LevelProfile,
        rng: &mut R,
    ) -> Result<Self, AnalysisError> {
        let grid = Grid::from_profile(profile, rng)?;
        Ok(Self::new(name, profile.name.clone(), grid))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn moves(&self) -> &[Move] {
        &self.record.moves
    }

    /// Commit a matching move, settle the cascade it triggers and log it with
    /// the time the player spent on it. Rejected moves leave no trace.
    pub fn play(&mut self, mv: Move, seconds: f64) -> Result<CascadeSummary, AnalysisError> {
        self.commit(mv, seconds)?;
        Ok(drain_cascades(&mut self.grid)?)
    }

    /// Commit and log a matching move without resolving it, for shells that
    /// animate each cascade step through [`SessionRecorder::cascade_step`].
    pub fn commit(&mut self, mv: Move, seconds: f64) -> Result<(), AnalysisError> {
        self.grid.try_apply_move(mv)?;
        self.record.moves.push(mv);
        self.record.times.push(seconds);
        Ok(())
    }

    pub fn cascade_step(&mut self) -> Option<CascadeStep> {
        self.grid.cascade_step()
    }

    /// Settle anything still pending, then stamp the final score and turn for
    /// verification.
    pub fn finish(mut self) -> Result<SessionRecord, AnalysisError> {
        drain_cascades(&mut self.grid)?;
        self.record.final_score = Some(self.grid.score());
        self.record.final_turn = Some(self.grid.turn());
        Ok(self.record)
    }
}
