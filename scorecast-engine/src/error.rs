use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised when a [`ScoreConfig`](crate::ScoreConfig) is internally inconsistent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{lower} ({lower_value}) must be below {upper} ({upper_value})")]
    ThresholdOrder {
        lower: &'static str,
        lower_value: u32,
        upper: &'static str,
        upper_value: u32,
    },
    #[error("hundred probability {probability} exceeds scale {scale}")]
    ProbabilityAboveScale { probability: u32, scale: u32 },
    #[error("probability scale must be positive")]
    ZeroScale,
    #[error("default raw score {raw_score} exceeds perfect score {perfect}")]
    DefaultAbovePerfect { raw_score: u32, perfect: u32 },
}

/// Errors surfaced by the score engine.
///
/// All window and timestamp checks run before the first simulated second, so
/// an error never comes with partial output.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScoreError {
    #[error("raw score {raw_score} leaves no randomization range above {threshold}")]
    ArithmeticPrecondition { raw_score: u32, threshold: u32 },
    #[error("raw score {raw_score} exceeds maximum {max}")]
    RawScoreOutOfRange { raw_score: u32, max: u32 },
    #[error("{field} must be positive (got {value})")]
    InvalidWindow { field: &'static str, value: u64 },
    #[error("instant {instant} is before the Unix epoch")]
    BeforeEpoch { instant: DateTime<Utc> },
    #[error("window of {seconds}s starting at {start} exceeds the supported time range")]
    WindowOverflow { start: DateTime<Utc>, seconds: u64 },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
