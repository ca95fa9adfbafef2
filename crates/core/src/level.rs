//! Level profiles: relative spawn weights per gem.

use serde::{Deserialize, Serialize};

use crate::Token;

/// Spawn weights, one per entry of [`Token::GEMS`]. A zero weight keeps that
/// gem out of generated streams entirely.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProfile {
    pub name: String,
    pub weights: [u32; 5],
}

impl LevelProfile {
    pub fn new(name: impl Into<String>, weights: [u32; 5]) -> Self {
        Self {
            name: name.into(),
            weights,
        }
    }

    /// Ruby and Emerald heavy, no Beryl. Long runs are common.
    pub fn l1() -> Self {
        Self::new("L1", [5, 4, 1, 1, 0])
    }

    /// Four gems, uniform.
    pub fn l2() -> Self {
        Self::new("L2", [1, 1, 1, 1, 0])
    }

    /// All five gems, uniform.
    pub fn l3() -> Self {
        Self::new("L3", [1, 1, 1, 1, 1])
    }

    pub fn presets() -> Vec<Self> {
        vec![Self::l1(), Self::l2(), Self::l3()]
    }

    /// Look up a preset by name, case-insensitively.
    pub fn preset(name: &str) -> Option<Self> {
        Self::presets()
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn weight(&self, token: Token) -> u32 {
        token.gem_index().map_or(0, |i| self.weights[i])
    }

    pub fn total_weight(&self) -> u64 {
        self.weights.iter().map(|&w| w as u64).sum()
    }
}

impl Default for LevelProfile {
    fn default() -> Self {
        Self::l3()
    }
}
