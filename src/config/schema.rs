//! Configuration schema for detector.toml.

use crate::detector::ScoringWeights;
use crate::session::{DEFAULT_HISTORY_LIMIT, DEFAULT_SUGGESTION_THRESHOLD};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Minimum confidence before a suggestion is shown in chat.
    pub suggestion_threshold: f64,

    /// Number of conversation turns a chat session keeps.
    pub history_limit: usize,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Confidence scoring constants.
    pub scoring: ScoringWeights,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            suggestion_threshold: DEFAULT_SUGGESTION_THRESHOLD,
            history_limit: DEFAULT_HISTORY_LIMIT,
            log_level: "info".into(),
            scoring: ScoringWeights::default(),
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.suggestion_threshold) {
            bail!(
                "suggestion_threshold must be within [0, 1], got {}",
                self.suggestion_threshold
            );
        }
        if self.history_limit == 0 {
            bail!("history_limit must be at least 1");
        }
        self.scoring.validate()?;
        Ok(())
    }
}
