//! Itemized per-second predictions.

use chrono::{DateTime, Utc};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::clock::{SeedClock, iso_millis};
use crate::config::ScoreConfig;
use crate::error::ScoreError;
use crate::kind::ScoreKind;
use crate::score::format_score;
use crate::timeline::{ScoreTimeline, TimelineEntry};

/// Which categories survive into the prediction list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindFilter {
    pub normal: bool,
    pub quadruple: bool,
    pub hundred: bool,
}

impl KindFilter {
    pub const ALL: Self = Self {
        normal: true,
        quadruple: true,
        hundred: true,
    };

    pub const RARE: Self = Self {
        normal: false,
        quadruple: true,
        hundred: true,
    };

    #[must_use]
    pub const fn none() -> Self {
        Self {
            normal: false,
            quadruple: false,
            hundred: false,
        }
    }

    #[must_use]
    pub fn from_kinds<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = ScoreKind>,
    {
        kinds.into_iter().fold(Self::none(), |mut filter, kind| {
            match kind {
                ScoreKind::Normal => filter.normal = true,
                ScoreKind::Quadruple => filter.quadruple = true,
                ScoreKind::Hundred => filter.hundred = true,
            }
            filter
        })
    }

    #[must_use]
    pub const fn allows(self, kind: ScoreKind) -> bool {
        match kind {
            ScoreKind::Normal => self.normal,
            ScoreKind::Quadruple => self.quadruple,
            ScoreKind::Hundred => self.hundred,
        }
    }
}

impl Default for KindFilter {
    fn default() -> Self {
        Self::ALL
    }
}

/// Arguments for [`predict`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictRequest {
    pub start: DateTime<Utc>,
    pub duration_seconds: u64,
    pub seed_clock: SeedClock,
    pub filter: KindFilter,
}

/// The score shown for one second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    #[serde(with = "iso_millis")]
    pub time: DateTime<Utc>,
    pub score_integer: u32,
    pub score_string: String,
    pub score_type: ScoreKind,
}

impl From<TimelineEntry> for Prediction {
    fn from(entry: TimelineEntry) -> Self {
        Self {
            time: entry.instant,
            score_integer: entry.score,
            score_string: format_score(entry.score),
            score_type: entry.kind,
        }
    }
}

/// Predict every second of the window, oldest first, keeping filtered kinds.
///
/// # Errors
///
/// Returns an error before any simulation if the window or config is invalid.
pub fn predict(
    request: &PredictRequest,
    config: &ScoreConfig,
) -> Result<Vec<Prediction>, ScoreError> {
    let timeline = ScoreTimeline::new(
        request.start,
        request.duration_seconds,
        request.seed_clock,
        config,
    )?;
    let predictions: Vec<Prediction> = timeline
        .filter(|entry| request.filter.allows(entry.kind))
        .inspect(|entry| {
            if entry.kind.is_rare() {
                trace!("{} at {} (seed {})", entry.kind, entry.instant, entry.seed);
            }
        })
        .map(Prediction::from)
        .collect();

    debug!(
        "predicted {} of {}s from {} ({:?} seed clock)",
        predictions.len(),
        request.duration_seconds,
        request.start,
        request.seed_clock
    );
    Ok(predictions)
}

/// First second at or after `start`, within `horizon_seconds`, scoring `kind`.
///
/// # Errors
///
/// Same validation as [`predict`], with `horizon_seconds` as the duration.
pub fn next_occurrence(
    start: DateTime<Utc>,
    kind: ScoreKind,
    horizon_seconds: u64,
    seed_clock: SeedClock,
    config: &ScoreConfig,
) -> Result<Option<Prediction>, ScoreError> {
    let found = ScoreTimeline::new(start, horizon_seconds, seed_clock, config)?
        .find(|entry| entry.kind == kind)
        .map(Prediction::from);
    debug!(
        "next {kind} from {start} within {horizon_seconds}s: {:?}",
        found.as_ref().map(|p| p.time)
    );
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn new_year() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap()
    }

    fn request(duration_seconds: u64, filter: KindFilter) -> PredictRequest {
        PredictRequest {
            start: new_year(),
            duration_seconds,
            seed_clock: SeedClock::Utc,
            filter,
        }
    }

    #[test]
    fn single_second_prediction() {
        let cfg = ScoreConfig::default();
        let predictions = predict(&request(1, KindFilter::ALL), &cfg).unwrap();
        assert_eq!(predictions.len(), 1);
        let first = &predictions[0];
        assert_eq!(first.time, new_year());
        assert_eq!(first.score_integer, 99_822);
        assert_eq!(first.score_string, "99.822");
        assert_eq!(first.score_type, ScoreKind::Normal);
    }

    #[test]
    fn serializes_camel_case_with_millis() {
        let cfg = ScoreConfig::default();
        let predictions = predict(&request(1, KindFilter::ALL), &cfg).unwrap();
        let json = serde_json::to_value(&predictions[0]).unwrap();
        assert_eq!(json["time"], "2022-01-01T00:00:00.000Z");
        assert_eq!(json["scoreInteger"], 99_822);
        assert_eq!(json["scoreString"], "99.822");
        assert_eq!(json["scoreType"], "Normal");

        let back: Prediction = serde_json::from_value(json).unwrap();
        assert_eq!(back, predictions[0]);
    }

    #[test]
    fn filter_keeps_only_requested_kinds() {
        let cfg = ScoreConfig::default();
        let rare = predict(&request(200, KindFilter::RARE), &cfg).unwrap();
        let hundred_offsets: Vec<i64> = rare
            .iter()
            .map(|p| (p.time - new_year()).num_seconds())
            .collect();
        assert_eq!(hundred_offsets, vec![21, 161, 186]);
        assert!(rare.iter().all(|p| p.score_type == ScoreKind::Hundred));
        assert!(rare.iter().all(|p| p.score_string == "100.000"));

        let nothing = predict(&request(200, KindFilter::none()), &cfg).unwrap();
        assert!(nothing.is_empty());
    }

    #[test]
    fn output_is_strictly_ascending() {
        let cfg = ScoreConfig::default();
        let predictions = predict(&request(120, KindFilter::ALL), &cfg).unwrap();
        assert_eq!(predictions.len(), 120);
        assert!(predictions.windows(2).all(|pair| pair[0].time < pair[1].time));
    }

    #[test]
    fn jst_seeding_reports_original_instant() {
        let cfg = ScoreConfig::default();
        let req = PredictRequest {
            seed_clock: SeedClock::Jst,
            ..request(1, KindFilter::ALL)
        };
        let predictions = predict(&req, &cfg).unwrap();
        assert_eq!(predictions[0].time, new_year());
        assert_eq!(predictions[0].score_integer, 99_955);
    }

    #[test]
    fn zero_duration_is_rejected() {
        let cfg = ScoreConfig::default();
        assert_eq!(
            predict(&request(0, KindFilter::ALL), &cfg),
            Err(ScoreError::InvalidWindow {
                field: "duration",
                value: 0
            })
        );
    }

    #[test]
    fn finds_next_hundred_and_quadruple() {
        let cfg = ScoreConfig::default();
        let hundred = next_occurrence(new_year(), ScoreKind::Hundred, 60, SeedClock::Utc, &cfg)
            .unwrap()
            .unwrap();
        assert_eq!(hundred.time, Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 21).unwrap());

        let epoch = Utc.timestamp_opt(0, 0).unwrap();
        let quad = next_occurrence(epoch, ScoreKind::Quadruple, 100, SeedClock::Utc, &cfg)
            .unwrap()
            .unwrap();
        assert_eq!(quad.time, Utc.timestamp_opt(68, 0).unwrap());
        assert_eq!(quad.score_string, "99.991");
    }

    #[test]
    fn next_occurrence_respects_horizon() {
        let cfg = ScoreConfig::default();
        let none = next_occurrence(new_year(), ScoreKind::Hundred, 21, SeedClock::Utc, &cfg)
            .unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn filter_from_kinds() {
        let filter = KindFilter::from_kinds([ScoreKind::Hundred, ScoreKind::Quadruple]);
        assert_eq!(filter, KindFilter::RARE);
        assert!(!filter.allows(ScoreKind::Normal));
        assert_eq!(KindFilter::default(), KindFilter::ALL);
    }
}
