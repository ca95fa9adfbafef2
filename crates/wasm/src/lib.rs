//! gemfall-wasm - WebAssembly entry points for a browser shell.
//!
//! The shell owns input and animation; everything it learns about the grid
//! comes through `JsGame` queries, and every change goes through its commands.

use gemfall_analysis::{review_session as review_core, SessionRecord, SessionRecorder};
use gemfall_core::{Coord, LevelProfile, Move, Token, GRID_SIZE};
use gemfall_engine::{
    generate_moves, has_any_move, CascadeStep, Grid, GridSnapshot, TokenStream,
};
use gemfall_search::Strategy;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// One cascade step, flattened for animation: clear, then fall, then refill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsCascadeStep {
    pub score: u32,
    pub cleared: Vec<Coord>,
    pub falls: Vec<(Coord, Coord)>,
    pub refilled: usize,
}

impl From<&CascadeStep> for JsCascadeStep {
    fn from(step: &CascadeStep) -> Self {
        Self {
            score: step.score,
            cleared: step.cleared.iter().collect(),
            falls: step.fall.iter().map(|f| (f.from, f.to)).collect(),
            refilled: step.refilled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsSnapshot {
    pub cells: Vec<u8>,
    pub score: u32,
    pub turn: u32,
}

impl From<GridSnapshot> for JsSnapshot {
    fn from(snapshot: GridSnapshot) -> Self {
        Self {
            cells: snapshot.cells.iter().flatten().map(|t| t.code()).collect(),
            score: snapshot.score,
            turn: snapshot.turn,
        }
    }
}

#[wasm_bindgen]
pub struct JsGame {
    recorder: SessionRecorder,
    rng: SmallRng,
}

#[wasm_bindgen]
impl JsGame {
    /// New settled game on a preset level; `seed` drives the token stream.
    #[wasm_bindgen(constructor)]
    pub fn new(name: &str, level: &str, seed: u64) -> Result<JsGame, JsError> {
        let profile = LevelProfile::preset(level)
            .ok_or_else(|| JsError::new(&format!("unknown level {level:?}")))?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let recorder = SessionRecorder::from_profile(name, &profile, &mut rng)?;
        Ok(Self { recorder, rng })
    }

    /// New game on a recorded token sequence, e.g. to retry a logged session.
    #[wasm_bindgen(js_name = fromTokens)]
    pub fn from_tokens(name: &str, level: &str, codes: &[u8]) -> Result<JsGame, JsError> {
        let grid = Grid::from_stream(TokenStream::from_codes(codes)?)?;
        Ok(Self {
            recorder: SessionRecorder::new(name, level, grid),
            rng: SmallRng::seed_from_u64(0),
        })
    }

    pub fn size() -> usize {
        GRID_SIZE
    }

    /// Row-major token codes.
    pub fn cells(&self) -> Vec<u8> {
        self.grid()
            .cells()
            .iter()
            .flat_map(|row| row.iter().map(|&t| t.code()))
            .collect()
    }

    pub fn cell(&self, x: i8, y: i8) -> u8 {
        self.grid()
            .get(Coord::new(x, y))
            .map_or(Token::Empty.code(), Token::code)
    }

    pub fn score(&self) -> u32 {
        self.grid().score()
    }

    pub fn turn(&self) -> u32 {
        self.grid().turn()
    }

    pub fn snapshot(&self) -> JsValue {
        let snapshot = JsSnapshot::from(self.grid().snapshot());
        serde_wasm_bindgen::to_value(&snapshot).unwrap_or_else(|_| JsValue::NULL)
    }

    /// Whether swapping the two cells would match. Malformed requests are
    /// simply `false`.
    #[wasm_bindgen(js_name = canSwap)]
    pub fn can_swap(&self, ax: i8, ay: i8, bx: i8, by: i8) -> bool {
        self.grid()
            .validate_move(Move::cells(ax, ay, bx, by))
            .unwrap_or(false)
    }

    /// Commit a matching swap. The cascade is left for `cascadeStep` so the
    /// shell can animate it.
    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(&mut self, ax: i8, ay: i8, bx: i8, by: i8, seconds: f64) -> Result<(), JsError> {
        self.recorder.commit(Move::cells(ax, ay, bx, by), seconds)?;
        Ok(())
    }

    /// Resolve one cascade step; `null` once the grid is stable.
    #[wasm_bindgen(js_name = cascadeStep)]
    pub fn cascade_step(&mut self) -> JsValue {
        match self.recorder.cascade_step() {
            Some(step) => serde_wasm_bindgen::to_value(&JsCascadeStep::from(&step))
                .unwrap_or_else(|_| JsValue::NULL),
            None => JsValue::NULL,
        }
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> JsValue {
        let moves = generate_moves(self.grid()).to_vec();
        serde_wasm_bindgen::to_value(&moves).unwrap_or_else(|_| JsValue::NULL)
    }

    #[wasm_bindgen(js_name = hasMoves)]
    pub fn has_moves(&self) -> bool {
        has_any_move(self.grid())
    }

    /// Ask a policy for a hint; `null` when no move exists.
    #[wasm_bindgen(js_name = suggestMove)]
    pub fn suggest_move(&mut self, strategy: &str) -> Result<JsValue, JsError> {
        let strategy: Strategy = strategy.parse()?;
        match strategy.select(self.recorder.grid(), &mut self.rng)? {
            Some(mv) => Ok(serde_wasm_bindgen::to_value(&mv)?),
            None => Ok(JsValue::NULL),
        }
    }

    /// The session so far as a JSON log, with any pending cascade settled.
    #[wasm_bindgen(js_name = exportSession)]
    pub fn export_session(&self) -> Result<String, JsError> {
        let record = self.recorder.clone().finish()?;
        Ok(record.to_json()?)
    }
}

impl JsGame {
    fn grid(&self) -> &Grid {
        self.recorder.grid()
    }
}

/// Replay a JSON session log and return the final snapshot.
#[wasm_bindgen(js_name = replaySession)]
pub fn replay_session(json: &str) -> Result<JsValue, JsError> {
    let outcome = SessionRecord::from_json(json)?.replay()?;
    let snapshot = JsSnapshot::from(outcome.grid.snapshot());
    Ok(serde_wasm_bindgen::to_value(&snapshot)?)
}

/// Grade every move of a JSON session log against the lookahead.
#[wasm_bindgen(js_name = reviewSession)]
pub fn review_session(json: &str) -> Result<JsValue, JsError> {
    let review = review_core(&SessionRecord::from_json(json)?)?;
    Ok(serde_wasm_bindgen::to_value(&review)?)
}
