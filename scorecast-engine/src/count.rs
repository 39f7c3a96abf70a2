//! Rare-score tallies per span, under both seed clocks.

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::clock::{self, SeedClock, iso_millis};
use crate::config::ScoreConfig;
use crate::error::ScoreError;
use crate::kind::ScoreKind;
use crate::timeline::ScoreTimeline;

/// Rare-category counts for one seed clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindTally {
    pub hundred_count: u64,
    pub quadruple_count: u64,
}

impl KindTally {
    pub const fn record(&mut self, kind: ScoreKind) {
        match kind {
            ScoreKind::Hundred => self.hundred_count += 1,
            ScoreKind::Quadruple => self.quadruple_count += 1,
            ScoreKind::Normal => {}
        }
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.hundred_count + self.quadruple_count
    }

    #[must_use]
    pub const fn merged(self, other: Self) -> Self {
        Self {
            hundred_count: self.hundred_count + other.hundred_count,
            quadruple_count: self.quadruple_count + other.quadruple_count,
        }
    }
}

/// Tallies for one span `[start_time, end_time)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountRecord {
    #[serde(with = "iso_millis")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    pub end_time: DateTime<Utc>,
    pub utc: KindTally,
    pub jst: KindTally,
}

impl CountRecord {
    #[must_use]
    pub fn span_seconds(&self) -> i64 {
        (self.end_time - self.start_time).num_seconds()
    }
}

/// Arguments for [`count_by_window`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountRequest {
    pub start: DateTime<Utc>,
    pub span_seconds: u64,
    pub duration_seconds: u64,
}

impl CountRequest {
    /// Number of spans, the last one possibly truncated.
    #[must_use]
    pub const fn span_count(&self) -> u64 {
        if self.span_seconds == 0 {
            return 0;
        }
        self.duration_seconds.div_ceil(self.span_seconds)
    }
}

/// Count hundred and quadruple seconds per span, seeding each second from
/// both the UTC and the JST clock independently.
///
/// # Errors
///
/// Returns an error before any simulation if either length is zero, the
/// window leaves the supported time range, or the config is invalid.
pub fn count_by_window(
    request: &CountRequest,
    config: &ScoreConfig,
) -> Result<Vec<CountRecord>, ScoreError> {
    if request.span_seconds == 0 {
        return Err(ScoreError::InvalidWindow {
            field: "span",
            value: request.span_seconds,
        });
    }
    // Validates the whole window for both clocks up front.
    ScoreTimeline::new(
        request.start,
        request.duration_seconds,
        SeedClock::Utc,
        config,
    )?;
    ScoreTimeline::new(
        request.start,
        request.duration_seconds,
        SeedClock::Jst,
        config,
    )?;

    let mut records = Vec::with_capacity(usize::try_from(request.span_count()).unwrap_or(0));
    let mut offset = 0;
    while offset < request.duration_seconds {
        let length = request.span_seconds.min(request.duration_seconds - offset);
        let span_start = clock::add_seconds(request.start, offset)?;
        let span_end = clock::add_seconds(span_start, length)?;
        records.push(CountRecord {
            start_time: span_start,
            end_time: span_end,
            utc: tally(span_start, length, SeedClock::Utc, config)?,
            jst: tally(span_start, length, SeedClock::Jst, config)?,
        });
        offset += length;
    }

    debug!(
        "counted {} spans of {}s over {}s from {}",
        records.len(),
        request.span_seconds,
        request.duration_seconds,
        request.start
    );
    Ok(records)
}

fn tally(
    start: DateTime<Utc>,
    seconds: u64,
    seed_clock: SeedClock,
    config: &ScoreConfig,
) -> Result<KindTally, ScoreError> {
    let mut tally = KindTally::default();
    for entry in ScoreTimeline::new(start, seconds, seed_clock, config)? {
        tally.record(entry.kind);
    }
    Ok(tally)
}
