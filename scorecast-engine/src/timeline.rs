//! Second-by-second score simulation over a window.

use chrono::{DateTime, TimeDelta, Utc};

use crate::clock::{self, SeedClock};
use crate::config::ScoreConfig;
use crate::error::ScoreError;
use crate::kind::ScoreKind;
use crate::score;

/// One simulated second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineEntry {
    /// Caller-facing instant, never shifted by the seed clock.
    pub instant: DateTime<Utc>,
    pub seed: u64,
    pub score: u32,
    pub kind: ScoreKind,
}

/// Lazy, restartable iterator over consecutive seconds of a window.
///
/// All validation happens in [`ScoreTimeline::new`]; iteration itself cannot
/// fail. Cloning the timeline restarts nothing, it forks the cursor.
#[derive(Debug, Clone)]
pub struct ScoreTimeline<'a> {
    config: &'a ScoreConfig,
    start: DateTime<Utc>,
    first_seed: u64,
    offset: u64,
    len: u64,
}

impl<'a> ScoreTimeline<'a> {
    /// Build a timeline of `seconds` seconds starting at `start`.
    ///
    /// # Errors
    ///
    /// Fails on an invalid config, a zero-length window, a start before the
    /// epoch (after applying the seed clock), or a window past the end of the
    /// representable time range.
    pub fn new(
        start: DateTime<Utc>,
        seconds: u64,
        seed_clock: SeedClock,
        config: &'a ScoreConfig,
    ) -> Result<Self, ScoreError> {
        config.validate()?;
        if seconds == 0 {
            return Err(ScoreError::InvalidWindow {
                field: "duration",
                value: seconds,
            });
        }
        clock::add_seconds(start, seconds)?;

        let shift = seed_clock.shift_seconds(config);
        let shifted = TimeDelta::try_seconds(shift)
            .and_then(|delta| start.checked_add_signed(delta))
            .ok_or(ScoreError::WindowOverflow { start, seconds })?;
        let first_seed =
            clock::unix_seconds(shifted).map_err(|_| ScoreError::BeforeEpoch { instant: start })?;
        first_seed
            .checked_add(seconds)
            .ok_or(ScoreError::WindowOverflow { start, seconds })?;
        // Derivation errors depend only on the raw score and config, never on the seed.
        score::derive_score(first_seed, config.default_raw_score, config)?;

        Ok(Self {
            config,
            start,
            first_seed,
            offset: 0,
            len: seconds,
        })
    }

    /// Seconds not yet yielded.
    #[must_use]
    pub const fn remaining(&self) -> u64 {
        self.len - self.offset
    }

    fn entry_at(&self, offset: u64) -> Option<TimelineEntry> {
        let instant = self
            .start
            .checked_add_signed(TimeDelta::try_seconds(i64::try_from(offset).ok()?)?)?;
        let seed = self.first_seed.checked_add(offset)?;
        let score = simulate(seed, self.config);
        Some(TimelineEntry {
            instant,
            seed,
            score,
            kind: ScoreKind::classify(score, self.config),
        })
    }
}

impl Iterator for ScoreTimeline<'_> {
    type Item = TimelineEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.len {
            return None;
        }
        let entry = self.entry_at(self.offset);
        self.offset += 1;
        entry
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

/// Score for the default baseline under an already validated config.
fn simulate(seed: u64, config: &ScoreConfig) -> u32 {
    // Checked once in `ScoreTimeline::new`.
    score::derive_score(seed, config.default_raw_score, config).unwrap_or(config.default_raw_score)
}
