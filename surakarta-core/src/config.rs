//! AI configuration

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::eval::Heuristics;

/// Default value of the unused search depth setting
pub const DEFAULT_SEARCH_DEPTH: u32 = 3;

/// Captures score this many times their static evaluation
pub const DEFAULT_CAPTURE_WEIGHT: i32 = 2;

/// Settings for [`crate::GreedyAI`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Reserved for a deeper search. The greedy player looks one ply ahead
    /// whatever this is set to.
    pub search_depth: u32,
    /// Multiplier applied to the score of capture actions
    pub capture_weight: i32,
    /// Evaluation weights
    pub heuristics: Heuristics,
    /// Break ties between equal scores at random instead of taking the first
    pub random_tie_break: bool,
    /// Seed for the tie-break RNG (None = seeded from entropy)
    pub seed: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            search_depth: DEFAULT_SEARCH_DEPTH,
            capture_weight: DEFAULT_CAPTURE_WEIGHT,
            heuristics: Heuristics::default(),
            random_tie_break: false,
            seed: None,
        }
    }
}

impl AiConfig {
    /// Load from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read AI config: {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse AI config: {}", path.display()))?;
        Ok(config)
    }

    /// Set custom heuristics
    pub fn with_heuristics(mut self, heuristics: Heuristics) -> Self {
        self.heuristics = heuristics;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Break ties at random
    pub fn with_random_tie_break(mut self, enabled: bool) -> Self {
        self.random_tie_break = enabled;
        self
    }

    /// Zero is ignored
    pub fn set_search_depth(&mut self, depth: u32) {
        if depth == 0 {
            return;
        }
        self.search_depth = depth;
    }
}
