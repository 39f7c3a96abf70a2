//! Time-seeded score derivation.
//!
//! A baseline raw score above the randomize threshold is replaced by a value
//! drawn from the one-shot generator, which may then be promoted to a perfect
//! score. Raw scores are thousandths of a point: `99_999` prints as `99.999`.

use crate::config::ScoreConfig;
use crate::constants::SCORE_FRACTION_DIVISOR;
use crate::error::{ConfigError, ScoreError};
use crate::rng;

/// Derive the score the machine would show for `unix_seconds`.
///
/// # Errors
///
/// Returns [`ScoreError::RawScoreOutOfRange`] when `raw_score` exceeds the
/// perfect score, [`ConfigError::ZeroScale`] for a zero probability scale, and
/// [`ScoreError::ArithmeticPrecondition`] if the randomization range is empty.
pub fn derive_score(
    unix_seconds: u64,
    raw_score: u32,
    config: &ScoreConfig,
) -> Result<u32, ScoreError> {
    if raw_score > config.perfect_score {
        return Err(ScoreError::RawScoreOutOfRange {
            raw_score,
            max: config.perfect_score,
        });
    }
    if raw_score <= config.randomize_threshold {
        return Ok(raw_score);
    }

    let range = raw_score
        .checked_sub(config.randomize_threshold)
        .filter(|range| *range > 0)
        .ok_or(ScoreError::ArithmeticPrecondition {
            raw_score,
            threshold: config.randomize_threshold,
        })?;
    let random_value = random_value(unix_seconds);
    let mut result = random_value % range + config.randomize_threshold;

    if result > config.hundred_threshold {
        let judgement = random_value
            .checked_rem(config.probability_scale)
            .ok_or(ConfigError::ZeroScale)?;
        if judgement < config.hundred_probability {
            result = config.perfect_score;
        }
    }

    Ok(result)
}

/// Drawn value plus the seed, both truncated to 32 bits and summed with wraparound.
#[inline]
#[must_use]
pub fn random_value(unix_seconds: u64) -> u32 {
    rng::generate(unix_seconds)
        .value
        .wrapping_add(rng::seed_state(unix_seconds))
}

/// Render a raw score as `<points>.<thousandths>`, e.g. `99.991`.
#[must_use]
pub fn format_score(score: u32) -> String {
    let whole = score / SCORE_FRACTION_DIVISOR;
    let fraction = score % SCORE_FRACTION_DIVISOR;
    format!("{whole}.{fraction:03}")
}
