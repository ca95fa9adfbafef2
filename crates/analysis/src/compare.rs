//! Batch strategy comparison over shared starting grids.

use gemfall_engine::Grid;
use gemfall_search::Strategy;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;

/// One automated game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub score: u32,
    pub moves_played: u32,
    /// The grid ran out of legal moves before the turn budget.
    pub ended_early: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyStats {
    pub level: String,
    pub strategy: Strategy,
    pub scores: Vec<u32>,
    pub mean: f64,
    /// Population standard deviation.
    pub stddev: f64,
    pub early_endings: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub rows: Vec<StrategyStats>,
}

impl ComparisonReport {
    pub fn get(&self, level: &str, strategy: Strategy) -> Option<&StrategyStats> {
        self.rows
            .iter()
            .find(|row| row.level == level && row.strategy == strategy)
    }
}

/// Play up to `turns` moves on a copy of `start`, settling after each.
pub fn play_game<R: Rng + ?Sized>(
    start: &Grid,
    strategy: Strategy,
    turns: u32,
    rng: &mut R,
) -> Result<GameResult, AnalysisError> {
    let mut grid = start.clone();
    let mut ended_early = false;
    for _ in 0..turns {
        let Some(mv) = strategy.select(&grid, rng)? else {
            ended_early = true;
            break;
        };
        grid.apply_move(mv);
        grid.drain_cascades()?;
    }
    Ok(GameResult {
        score: grid.score(),
        moves_played: grid.turn() - start.turn(),
        ended_early,
    })
}

/// Every strategy plays the same starting grids, and each game re-seeds the
/// strategy RNG with the same value, so rows differ only by policy.
pub fn compare_strategies(config: &AnalysisConfig) -> Result<ComparisonReport, AnalysisError> {
    let profiles = config.profiles()?;
    let mut master = SmallRng::seed_from_u64(config.seed);
    let mut report = ComparisonReport::default();

    for profile in &profiles {
        let mut games: Vec<Vec<GameResult>> = vec![Vec::new(); config.strategies.len()];

        for epoch in 0..config.epochs {
            let start = Grid::from_profile(profile, &mut master)?;
            let game_seed: u64 = master.gen();
            for (slot, &strategy) in config.strategies.iter().enumerate() {
                let mut rng = SmallRng::seed_from_u64(game_seed);
                let result = play_game(&start, strategy, config.turns, &mut rng)?;
                debug!(level = %profile.name, epoch, %strategy, score = result.score, "game finished");
                games[slot].push(result);
            }
        }

        for (&strategy, results) in config.strategies.iter().zip(games) {
            let scores: Vec<u32> = results.iter().map(|r| r.score).collect();
            let (mean, stddev) = mean_and_stddev(&scores);
            info!(level = %profile.name, %strategy, mean, stddev, "strategy summary");
            report.rows.push(StrategyStats {
                level: profile.name.clone(),
                strategy,
                early_endings: results.iter().filter(|r| r.ended_early).count() as u32,
                scores,
                mean,
                stddev,
            });
        }
    }

    Ok(report)
}

/// Mean and population standard deviation; `(0, 0)` for no samples.
pub fn mean_and_stddev(samples: &[u32]) -> (f64, f64) {
    if samples.is_empty() {
        return (0.0, 0.0);
    }
    let n = samples.len() as f64;
    let mean = samples.iter().map(|&s| s as f64).sum::<f64>() / n;
    let var = samples
        .iter()
        .map(|&s| {
            let d = s as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    (mean, var.sqrt())
}
