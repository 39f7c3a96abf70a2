use anyhow::{Context, Result, bail};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use clap::ValueEnum;
use scorecast_engine::{KindFilter, ScoreConfig, ScoreKind, jst_offset};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Zone used to read start times without an offset and to display instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DisplayZone {
    Utc,
    Jst,
}

impl DisplayZone {
    pub fn offset(self, config: &ScoreConfig) -> Result<FixedOffset> {
        match self {
            Self::Utc => Ok(Utc.fix()),
            Self::Jst => jst_offset(config).context("configured JST offset is out of range"),
        }
    }

    pub fn render(self, instant: &DateTime<Utc>, config: &ScoreConfig) -> String {
        match self.offset(config) {
            Ok(offset) => instant
                .with_timezone(&offset)
                .format("%Y-%m-%d %H:%M:%S %:z")
                .to_string(),
            Err(_) => scorecast_engine::format_instant(instant),
        }
    }
}

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Parse a start time.
///
/// Accepts `now`, RFC 3339 (its own offset wins), or a naive date/time which
/// is read in `zone`.
pub fn parse_start(raw: &str, zone: DisplayZone, config: &ScoreConfig) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("now") {
        return Ok(Utc::now());
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .with_context(|| format!("unrecognized start time: {raw}"))?;

    let offset = zone.offset(config)?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
        .with_context(|| format!("start time {raw} is not representable in {zone:?}"))
}

/// Parse `normal,quadruple,hundred` (or `all`) into a filter.
pub fn parse_kinds(raw: &str) -> Result<KindFilter> {
    let tokens = split_csv(raw);
    if tokens.is_empty() {
        bail!("at least one score kind must be included");
    }
    if tokens.iter().any(|t| t.eq_ignore_ascii_case("all")) {
        return Ok(KindFilter::ALL);
    }
    let kinds = tokens
        .iter()
        .map(|token| token.parse::<ScoreKind>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(KindFilter::from_kinds(kinds))
}

/// Reject windows the caller did not allow.
pub fn check_admission(label: &str, seconds: u64, max_seconds: u64) -> Result<()> {
    if seconds > max_seconds {
        bail!("{label} of {seconds}s exceeds --max-duration {max_seconds}s");
    }
    Ok(())
}
