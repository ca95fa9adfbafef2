//! Let a policy play one game and write the session log.
//!
//! ```bash
//! cargo run --release --bin record_session -- --level L1 --strategy optimal --out log/bot.json
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use gemfall::{LevelProfile, SessionRecorder, Strategy};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Player name stored in the log.
    #[arg(short, long, default_value = "bot")]
    name: String,

    #[arg(short, long, default_value = "L3")]
    level: String,

    #[arg(short, long, default_value_t = Strategy::Optimal)]
    strategy: Strategy,

    /// Maximum number of moves; the game stops early when none is left.
    #[arg(short, long, default_value_t = 10)]
    turns: u32,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output path for the JSON log.
    #[arg(short, long)]
    out: PathBuf,
}

fn main() -> Result<()> {
    gemfall::init_tracing();
    let args = Args::parse();

    let profile = LevelProfile::preset(&args.level)
        .with_context(|| format!("unknown level {:?}", args.level))?;
    let mut rng = SmallRng::seed_from_u64(args.seed);
    let mut recorder = SessionRecorder::from_profile(&args.name, &profile, &mut rng)?;

    for _ in 0..args.turns {
        let started = Instant::now();
        let Some(mv) = args.strategy.select(recorder.grid(), &mut rng)? else {
            info!(turn = recorder.grid().turn(), "no legal move left");
            break;
        };
        let summary = recorder.play(mv, started.elapsed().as_secs_f64())?;
        debug!(%mv, steps = summary.steps, gained = summary.score, "played");
    }

    let record = recorder.finish()?;
    record
        .save(&args.out)
        .with_context(|| format!("writing {}", args.out.display()))?;
    println!(
        "{} moves, final score {} -> {}",
        record.moves.len(),
        record.final_score.unwrap_or_default(),
        args.out.display()
    );
    Ok(())
}
