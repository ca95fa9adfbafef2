//! Compare move policies over shared starting grids.
//!
//! ```bash
//! cargo run --release --bin analyze_strategies -- --levels L1,L3 --epochs 50
//! RUST_LOG=debug cargo run --bin analyze_strategies -- --config runs/quick.json --json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gemfall::analysis::compare_strategies;
use gemfall::{AnalysisConfig, Strategy};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file; flags below override its fields.
    #[arg(short, long, env = "GEMFALL_CONFIG")]
    config: Option<PathBuf>,

    /// Level presets to run, comma separated.
    #[arg(short, long, value_delimiter = ',')]
    levels: Vec<String>,

    /// Policies to compare, comma separated.
    #[arg(short, long, value_delimiter = ',')]
    strategies: Vec<Strategy>,

    /// Starting grids per level.
    #[arg(short, long)]
    epochs: Option<u32>,

    /// Moves per game.
    #[arg(short, long)]
    turns: Option<u32>,

    #[arg(long)]
    seed: Option<u64>,

    /// Print the full report as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn into_config(self) -> Result<(AnalysisConfig, bool)> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => AnalysisConfig::default(),
        };
        if !self.levels.is_empty() {
            config.levels = self.levels;
        }
        if !self.strategies.is_empty() {
            config.strategies = self.strategies;
        }
        if let Some(epochs) = self.epochs {
            config.epochs = epochs;
        }
        if let Some(turns) = self.turns {
            config.turns = turns;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        Ok((config, self.json))
    }
}

fn main() -> Result<()> {
    gemfall::init_tracing();
    let (config, json) = Args::parse().into_config()?;
    info!(?config, "starting comparison");

    let report = compare_strategies(&config).context("strategy comparison failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{:<6} {:<8} {:>10} {:>10} {:>6}",
        "level", "strategy", "mean", "stddev", "early"
    );
    for row in &report.rows {
        println!(
            "{:<6} {:<8} {:>10.2} {:>10.2} {:>6}",
            row.level, row.strategy, row.mean, row.stddev, row.early_endings
        );
    }
    Ok(())
}
