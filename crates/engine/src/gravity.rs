//! Gravity: compacting each column's gems toward the bottom row.

use gemfall_core::{Coord, Token, GRID_SIZE};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::Grid;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct FallStep {
    pub from: Coord,
    pub to: Coord,
}

/// Ordered moves for one gravity pass, column by column, bottom-up within a
/// column. Only valid against the state it was computed from.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct FallPlan {
    steps: SmallVec<[FallStep; 32]>,
}

impl FallPlan {
    pub fn steps(&self) -> &[FallStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FallStep> {
        self.steps.iter()
    }
}

impl Grid {
    /// Minimal moves that drop every gem onto the one below it, preserving
    /// vertical order and leaving empties at the top. Pure.
    pub fn compute_fall(&self) -> FallPlan {
        let mut plan = FallPlan::default();
        for x in 0..GRID_SIZE {
            let mut dest = GRID_SIZE;
            for y in (0..GRID_SIZE).rev() {
                if self.cells[y][x].is_empty() {
                    continue;
                }
                dest -= 1;
                if y < dest {
                    plan.steps.push(FallStep {
                        from: Coord::new(x as i8, y as i8),
                        to: Coord::new(x as i8, dest as i8),
                    });
                }
            }
        }
        plan
    }

    /// Execute a plan from [`Grid::compute_fall`] on the same state.
    pub fn apply_fall(&mut self, plan: &FallPlan) {
        for step in plan.iter() {
            let (fx, fy) = (step.from.x as usize, step.from.y as usize);
            let (tx, ty) = (step.to.x as usize, step.to.y as usize);
            self.cells[ty][tx] = self.cells[fy][fx];
            self.cells[fy][fx] = Token::Empty;
        }
    }
}
