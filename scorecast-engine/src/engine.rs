use chrono::{DateTime, Utc};

use crate::clock::SeedClock;
use crate::config::ScoreConfig;
use crate::count::{CountRecord, CountRequest, count_by_window};
use crate::error::{ConfigError, ScoreError};
use crate::kind::ScoreKind;
use crate::predict::{PredictRequest, Prediction, next_occurrence, predict};
use crate::score::derive_score;

/// Score engine bound to one validated configuration.
///
/// Every call is a pure function of its arguments and the configuration, so an
/// engine can be shared freely and calls may run in any order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreEngine {
    config: ScoreConfig,
}

impl ScoreEngine {
    /// Create an engine after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns the first configuration invariant that does not hold.
    pub fn new(config: ScoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &ScoreConfig {
        &self.config
    }

    /// Score for `unix_seconds` from the configured default baseline.
    ///
    /// # Errors
    ///
    /// See [`derive_score`].
    pub fn derive(&self, unix_seconds: u64) -> Result<u32, ScoreError> {
        derive_score(unix_seconds, self.config.default_raw_score, &self.config)
    }

    /// Score for `unix_seconds` from an explicit baseline.
    ///
    /// # Errors
    ///
    /// See [`derive_score`].
    pub fn derive_with_raw(&self, unix_seconds: u64, raw_score: u32) -> Result<u32, ScoreError> {
        derive_score(unix_seconds, raw_score, &self.config)
    }

    #[must_use]
    pub const fn classify(&self, score: u32) -> ScoreKind {
        ScoreKind::classify(score, &self.config)
    }

    /// # Errors
    ///
    /// See [`predict`].
    pub fn predict(&self, request: &PredictRequest) -> Result<Vec<Prediction>, ScoreError> {
        predict(request, &self.config)
    }

    /// # Errors
    ///
    /// See [`count_by_window`].
    pub fn count_by_window(&self, request: &CountRequest) -> Result<Vec<CountRecord>, ScoreError> {
        count_by_window(request, &self.config)
    }

    /// # Errors
    ///
    /// See [`next_occurrence`].
    pub fn next_occurrence(
        &self,
        start: DateTime<Utc>,
        kind: ScoreKind,
        horizon_seconds: u64,
        seed_clock: SeedClock,
    ) -> Result<Option<Prediction>, ScoreError> {
        next_occurrence(start, kind, horizon_seconds, seed_clock, &self.config)
    }
}
