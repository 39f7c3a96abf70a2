//! Score classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::ScoreConfig;

/// Category of a derived score. Exactly one applies to any raw score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScoreKind {
    Normal,
    /// Above the hundred threshold but short of perfect; four nines or better.
    Quadruple,
    /// Exactly the perfect score.
    Hundred,
}

impl ScoreKind {
    pub const ALL: [Self; 3] = [Self::Normal, Self::Quadruple, Self::Hundred];

    /// Classify a score against the configured thresholds.
    #[must_use]
    pub const fn classify(score: u32, config: &ScoreConfig) -> Self {
        if score == config.perfect_score {
            Self::Hundred
        } else if score > config.hundred_threshold && score < config.perfect_score {
            Self::Quadruple
        } else {
            Self::Normal
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Quadruple => "quadruple",
            Self::Hundred => "hundred",
        }
    }

    #[must_use]
    pub const fn is_rare(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

impl fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown score kind '{0}' (expected normal, quadruple or hundred)")]
pub struct ParseScoreKindError(pub String);

impl FromStr for ScoreKind {
    type Err = ParseScoreKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseScoreKindError(needle.to_string()))
    }
}
