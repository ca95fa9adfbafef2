use std::path::PathBuf;

use gemfall_analysis::{
    compare_strategies, review_session, AnalysisConfig, AnalysisError, SessionRecord,
    SessionRecorder,
};
use gemfall_core::LevelProfile;
use gemfall_search::Strategy;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("gemfall-{}-{name}", std::process::id()))
}

/// Let the lookahead play a few turns so the record holds real moves.
fn bot_session(seed: u64, turns: usize) -> SessionRecord {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut rec = SessionRecorder::from_profile("bot", &LevelProfile::l2(), &mut rng).unwrap();
    for _ in 0..turns {
        let Some(mv) = Strategy::Optimal.select(rec.grid(), &mut rng).unwrap() else {
            break;
        };
        rec.play(mv, 0.25).unwrap();
    }
    rec.finish().unwrap()
}

#[test]
fn test_save_load_replay() {
    let record = bot_session(3, 6);
    let path = scratch_path("session.json");
    record.save(&path).unwrap();

    let loaded = SessionRecord::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, record);
    let outcome = loaded.replay().unwrap();
    assert_eq!(Some(outcome.grid.score()), record.final_score);
    assert_eq!(Some(outcome.grid.turn()), record.final_turn);
    assert_eq!(record.level, "L2");
    assert_eq!(record.candidates.len(), gemfall_core::TOKEN_STREAM_LEN);
}

#[test]
fn test_bot_session_has_no_misses() {
    let review = review_session(&bot_session(5, 4)).unwrap();
    assert!(review.missed.is_empty());
    assert_eq!(review.accuracy, 100.0);
}

#[test]
fn test_missing_file_reports_path() {
    let path = scratch_path("does-not-exist.json");
    match SessionRecord::load(&path) {
        Err(AnalysisError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn test_config_file_round_trip() {
    let path = scratch_path("config.json");
    std::fs::write(&path, r#"{"levels":["L1"],"strategies":["low","good"],"epochs":2,"turns":3,"seed":9}"#)
        .unwrap();
    let config = AnalysisConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let report = compare_strategies(&config).unwrap();
    assert_eq!(report.rows.len(), 2);
    assert!(report.rows.iter().all(|row| row.level == "L1" && row.scores.len() == 2));
}
