use std::fs;
use std::path::Path;

use gemfall_core::LevelProfile;
use gemfall_search::Strategy;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Batch comparison settings. Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Preset names, resolved through `LevelProfile::preset`.
    pub levels: Vec<String>,
    pub strategies: Vec<Strategy>,
    /// Starting grids per level.
    pub epochs: u32,
    /// Moves per game.
    pub turns: u32,
    pub seed: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            levels: LevelProfile::presets().into_iter().map(|p| p.name).collect(),
            strategies: Strategy::ALL.to_vec(),
            epochs: 30,
            turns: 10,
            seed: 273_426,
        }
    }
}

impl AnalysisConfig {
    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;
        Self::from_json(&text)
    }

    pub fn profiles(&self) -> Result<Vec<LevelProfile>, AnalysisError> {
        self.levels
            .iter()
            .map(|name| {
                LevelProfile::preset(name).ok_or_else(|| AnalysisError::UnknownLevel(name.clone()))
            })
            .collect()
    }
}
