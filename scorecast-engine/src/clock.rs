//! Instants, seed clocks and ISO-8601 serialization.
//!
//! The machine seeds from its own wall clock. When that clock runs on JST the
//! seed is the UTC Unix time plus a fixed nine hours; no timezone database is
//! involved.

use chrono::{DateTime, FixedOffset, SecondsFormat, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ScoreConfig;
use crate::error::ScoreError;

/// Clock the simulated machine seeds from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedClock {
    #[default]
    Utc,
    Jst,
}

impl SeedClock {
    #[must_use]
    pub const fn from_jst_flag(use_jst_offset: bool) -> Self {
        if use_jst_offset { Self::Jst } else { Self::Utc }
    }

    /// Seconds added to the Unix time before seeding.
    #[must_use]
    pub const fn shift_seconds(self, config: &ScoreConfig) -> i64 {
        match self {
            Self::Utc => 0,
            Self::Jst => config.jst_offset_seconds,
        }
    }
}

/// Fixed offset used to display instants in Japan Standard Time.
#[must_use]
pub fn jst_offset(config: &ScoreConfig) -> Option<FixedOffset> {
    i32::try_from(config.jst_offset_seconds)
        .ok()
        .and_then(FixedOffset::east_opt)
}

/// Floor of the instant's Unix time, as a non-negative seed.
///
/// # Errors
///
/// Returns [`ScoreError::BeforeEpoch`] for instants before 1970.
pub fn unix_seconds(instant: DateTime<Utc>) -> Result<u64, ScoreError> {
    u64::try_from(instant.timestamp()).map_err(|_| ScoreError::BeforeEpoch { instant })
}

/// Offset `instant` by a whole number of seconds.
///
/// # Errors
///
/// Returns [`ScoreError::WindowOverflow`] if the result is not representable.
pub fn add_seconds(instant: DateTime<Utc>, seconds: u64) -> Result<DateTime<Utc>, ScoreError> {
    i64::try_from(seconds)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .and_then(|delta| instant.checked_add_signed(delta))
        .ok_or(ScoreError::WindowOverflow {
            start: instant,
            seconds,
        })
}

/// RFC 3339 with millisecond precision and a `Z` suffix.
#[must_use]
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde adapter emitting instants as `2022-01-01T00:00:00.000Z`.
pub mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_instant(instant))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
