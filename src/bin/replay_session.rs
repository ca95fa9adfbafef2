//! Replay a session log, verify it and optionally grade every move.
//!
//! ```bash
//! cargo run --bin replay_session -- log/bot.json --review
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gemfall::analysis::review_session;
use gemfall::SessionRecord;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON session log.
    log: PathBuf,

    /// Compare each move against the lookahead pick.
    #[arg(short, long)]
    review: bool,
}

fn main() -> Result<()> {
    gemfall::init_tracing();
    let args = Args::parse();

    let record = SessionRecord::load(&args.log)
        .with_context(|| format!("reading {}", args.log.display()))?;
    let outcome = record.replay().context("replay failed")?;

    println!("{}", outcome.grid);
    println!(
        "{} ({}): {} moves, score {}, turn {}",
        record.name,
        record.level,
        record.moves.len(),
        outcome.grid.score(),
        outcome.grid.turn()
    );

    if args.review {
        let review = review_session(&record)?;
        for miss in &review.missed {
            println!(
                "turn {:>3}: played {} for {}, best {} for {} ({:?})",
                miss.turn,
                miss.player_move,
                miss.player_score,
                miss.best_move,
                miss.best_score,
                miss.severity
            );
        }
        println!("accuracy {:.1}", review.accuracy);
    }
    Ok(())
}
