//! gemfall - deterministic match-3 engine, move policies and session tooling.
//!
//! Re-exports the workspace crates under one roof and hosts the helpers the
//! command-line drivers share.

pub use gemfall_analysis as analysis;
pub use gemfall_engine as engine;
pub use gemfall_search as search;

pub use gemfall_analysis::{AnalysisConfig, AnalysisError, SessionRecord, SessionRecorder};
pub use gemfall_core::{Coord, LevelProfile, Move, Token, GRID_SIZE};
pub use gemfall_engine::{EngineError, Grid};
pub use gemfall_search::Strategy;

use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
