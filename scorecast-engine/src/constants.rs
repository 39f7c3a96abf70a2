//! Fixed numeric constants for the score simulation.
//!
//! These values reproduce the scoring machine bit-for-bit. They are only
//! read through [`ScoreConfig`](crate::config::ScoreConfig) defaults and the
//! generator, so changing one is a reviewed code change rather than a runtime
//! knob.

// Generator ----------------------------------------------------------------
pub(crate) const LCG_MULTIPLIER: u32 = 1_103_515_245;
pub(crate) const LCG_INCREMENT: u32 = 12_345;
pub(crate) const LCG_OUTPUT_SHIFT: u32 = 16;
pub(crate) const LCG_OUTPUT_MASK: u32 = 0x7FFF;

// Scoring ------------------------------------------------------------------
/// Highest possible raw score, printed as `100.000`.
pub const PERFECT_SCORE: u32 = 100_000;
/// Raw scores at or below this value are never randomized.
pub const RANDOMIZE_THRESHOLD: u32 = 99_000;
/// Randomized scores strictly above this value may be promoted to perfect.
pub const HUNDRED_THRESHOLD: u32 = 99_990;
/// Chance of promotion, out of [`PROBABILITY_SCALE`].
pub const HUNDRED_PROBABILITY: u32 = 500;
pub const PROBABILITY_SCALE: u32 = 1_000;
/// Baseline raw score used when the caller does not supply one.
pub const DEFAULT_RAW_SCORE: u32 = 99_999;

// Clock --------------------------------------------------------------------
/// Fixed Japan Standard Time shift applied before seeding.
pub const JST_OFFSET_SECONDS: i64 = 9 * 60 * 60;

// Formatting ---------------------------------------------------------------
pub(crate) const SCORE_FRACTION_DIVISOR: u32 = 1_000;
