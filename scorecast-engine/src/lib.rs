//! Scorecast Engine
//!
//! Deterministic replica of a karaoke scoring machine's time-seeded total
//! score. Given a window of wall-clock seconds, the engine predicts the score
//! the machine would show for each second and counts rare outcomes.
//! This crate performs no I/O; callers supply validated instants and render
//! the results.

pub mod clock;
pub mod config;
pub mod constants;
pub mod count;
pub mod engine;
pub mod error;
pub mod kind;
pub mod predict;
pub mod rng;
pub mod score;
pub mod timeline;

// Re-export commonly used types
pub use clock::{SeedClock, format_instant, jst_offset, unix_seconds};
pub use config::ScoreConfig;
pub use count::{CountRecord, CountRequest, KindTally, count_by_window};
pub use engine::ScoreEngine;
pub use error::{ConfigError, ScoreError};
pub use kind::{ParseScoreKindError, ScoreKind};
pub use predict::{KindFilter, PredictRequest, Prediction, next_occurrence, predict};
pub use rng::{Draw, generate};
pub use score::{derive_score, format_score};
pub use timeline::{ScoreTimeline, TimelineEntry};
