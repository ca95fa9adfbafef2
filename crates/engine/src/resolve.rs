//! Cascade resolution: scan, clear, fall, refill until the grid is stable.

use gemfall_core::GRID_SIZE;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::gravity::FallPlan;
use crate::matches::ClearMask;
use crate::{EngineError, Grid};

/// Any cascade longer than this is a logic defect, not bad luck.
pub const MAX_CASCADE_STEPS: usize = 10 * GRID_SIZE * GRID_SIZE;

/// What one cascade step did, in the order a shell animates it.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CascadeStep {
    pub score: u32,
    pub cleared: ClearMask,
    pub fall: FallPlan,
    pub refilled: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct CascadeSummary {
    pub steps: usize,
    pub score: u32,
}

impl Grid {
    /// Run one scan/clear/fall/refill step. `None` when nothing matched, in
    /// which case the grid is left untouched.
    pub fn cascade_step(&mut self) -> Option<CascadeStep> {
        let scan = self.scan_matches();
        if scan.is_stable() {
            return None;
        }
        let score = self.clear_marked(&scan);
        let fall = self.compute_fall();
        self.apply_fall(&fall);
        let refilled = self.refill();
        trace!(score, runs = scan.runs.len(), refilled, "cascade step");
        Some(CascadeStep {
            score,
            cleared: scan.mask,
            fall,
            refilled,
        })
    }

    pub fn drain_cascades(&mut self) -> Result<CascadeSummary, EngineError> {
        drain_cascades(self)
    }
}

/// Settle the grid after a committed move, accumulating score.
pub fn drain_cascades(grid: &mut Grid) -> Result<CascadeSummary, EngineError> {
    let mut summary = CascadeSummary::default();
    while let Some(step) = grid.cascade_step() {
        summary.steps += 1;
        summary.score += step.score;
        if summary.steps > MAX_CASCADE_STEPS {
            error!(steps = summary.steps, "cascade did not settle");
            return Err(EngineError::CascadeOverflow {
                steps: summary.steps,
            });
        }
    }
    if summary.steps > 0 {
        debug!(
            steps = summary.steps,
            gained = summary.score,
            total = grid.score,
            "cascades drained"
        );
    }
    Ok(summary)
}
