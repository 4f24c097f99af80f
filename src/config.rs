//! Pipeline configuration.
//!
//! Every field has a default, so an empty JSON object `{}` is a valid
//! configuration file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::tips::EmptyTipsPolicy;

pub const DEFAULT_MATCH_THRESHOLD: f64 = 85.0;
pub const DEFAULT_SIMILARITY_CUTOFF: f64 = 0.8;
pub const DEFAULT_MAX_EDIT_DISTANCE: u8 = 2;
pub const DEFAULT_MIN_PHRASE_CHARS: usize = 3;

fn default_cutoff() -> f64 {
    DEFAULT_SIMILARITY_CUTOFF
}

fn default_max_edit_distance() -> u8 {
    DEFAULT_MAX_EDIT_DISTANCE
}

/// How out-of-lexicon words are corrected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CorrectionStrategy {
    /// Most similar lexicon word, if its similarity (0..=1) reaches `cutoff`.
    ClosestMatch {
        #[serde(default = "default_cutoff")]
        cutoff: f64,
    },
    /// Most frequent lexicon word among the closest within `max_edit_distance`.
    Frequency {
        #[serde(default = "default_max_edit_distance")]
        max_edit_distance: u8,
    },
}

impl Default for CorrectionStrategy {
    fn default() -> Self {
        CorrectionStrategy::Frequency {
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Minimum weighted-ratio score (0..=100) for a phrase to match a symptom.
    pub match_threshold: f64,
    pub correction: CorrectionStrategy,
    /// Shorter phrases are not matched. Lowered to the shortest symptom name
    /// when a name is shorter.
    pub min_phrase_chars: usize,
    pub empty_tips: EmptyTipsPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            correction: CorrectionStrategy::default(),
            min_phrase_chars: DEFAULT_MIN_PHRASE_CHARS,
            empty_tips: EmptyTipsPolicy::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.match_threshold) {
            return Err(Error::Config(format!(
                "match_threshold must be within 0..=100, got {}",
                self.match_threshold
            )));
        }
        if let CorrectionStrategy::ClosestMatch { cutoff } = self.correction {
            if !(0.0..=1.0).contains(&cutoff) {
                return Err(Error::Config(format!(
                    "closest_match cutoff must be within 0..=1, got {cutoff}"
                )));
            }
        }
        Ok(())
    }
}
