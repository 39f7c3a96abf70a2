//! Scoring thresholds as an explicit, read-only configuration.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::ConfigError;

/// Thresholds and offsets driving score derivation.
///
/// [`ScoreConfig::default`] reproduces the scoring machine. Other values are
/// only useful for experiments and must pass [`ScoreConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreConfig {
    #[serde(default = "ScoreConfig::default_randomize_threshold")]
    pub randomize_threshold: u32,
    #[serde(default = "ScoreConfig::default_hundred_threshold")]
    pub hundred_threshold: u32,
    #[serde(default = "ScoreConfig::default_hundred_probability")]
    pub hundred_probability: u32,
    #[serde(default = "ScoreConfig::default_probability_scale")]
    pub probability_scale: u32,
    #[serde(default = "ScoreConfig::default_perfect_score")]
    pub perfect_score: u32,
    #[serde(default = "ScoreConfig::default_raw_score")]
    pub default_raw_score: u32,
    #[serde(default = "ScoreConfig::default_jst_offset_seconds")]
    pub jst_offset_seconds: i64,
}

impl ScoreConfig {
    const fn default_randomize_threshold() -> u32 {
        constants::RANDOMIZE_THRESHOLD
    }

    const fn default_hundred_threshold() -> u32 {
        constants::HUNDRED_THRESHOLD
    }

    const fn default_hundred_probability() -> u32 {
        constants::HUNDRED_PROBABILITY
    }

    const fn default_probability_scale() -> u32 {
        constants::PROBABILITY_SCALE
    }

    const fn default_perfect_score() -> u32 {
        constants::PERFECT_SCORE
    }

    const fn default_raw_score() -> u32 {
        constants::DEFAULT_RAW_SCORE
    }

    const fn default_jst_offset_seconds() -> i64 {
        constants::JST_OFFSET_SECONDS
    }

    /// Parse a configuration from JSON, filling omitted fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check threshold ordering and probability bounds.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.probability_scale == 0 {
            return Err(ConfigError::ZeroScale);
        }
        if self.hundred_probability > self.probability_scale {
            return Err(ConfigError::ProbabilityAboveScale {
                probability: self.hundred_probability,
                scale: self.probability_scale,
            });
        }
        if self.randomize_threshold >= self.hundred_threshold {
            return Err(ConfigError::ThresholdOrder {
                lower: "randomizeThreshold",
                lower_value: self.randomize_threshold,
                upper: "hundredThreshold",
                upper_value: self.hundred_threshold,
            });
        }
        if self.hundred_threshold >= self.perfect_score {
            return Err(ConfigError::ThresholdOrder {
                lower: "hundredThreshold",
                lower_value: self.hundred_threshold,
                upper: "perfectScore",
                upper_value: self.perfect_score,
            });
        }
        if self.default_raw_score > self.perfect_score {
            return Err(ConfigError::DefaultAbovePerfect {
                raw_score: self.default_raw_score,
                perfect: self.perfect_score,
            });
        }
        Ok(())
    }
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            randomize_threshold: Self::default_randomize_threshold(),
            hundred_threshold: Self::default_hundred_threshold(),
            hundred_probability: Self::default_hundred_probability(),
            probability_scale: Self::default_probability_scale(),
            perfect_score: Self::default_perfect_score(),
            default_raw_score: Self::default_raw_score(),
            jst_offset_seconds: Self::default_jst_offset_seconds(),
        }
    }
}
