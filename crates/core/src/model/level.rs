use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LevelError {
    #[error("unknown level: {0}")]
    Unknown(String),
}

//
// ─── LEVEL ────────────────────────────────────────────────────────────────────
//

/// Difficulty of a subtopic, as assigned by the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Easy, Level::Medium, Level::Hard];

    /// Wire and display name ("Easy", "Medium", "Hard").
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Easy => "Easy",
            Level::Medium => "Medium",
            Level::Hard => "Hard",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Easy" => Ok(Level::Easy),
            "Medium" => Ok(Level::Medium),
            "Hard" => Ok(Level::Hard),
            other => Err(LevelError::Unknown(other.to_string())),
        }
    }
}

//
// ─── LEVEL FILTER ─────────────────────────────────────────────────────────────
//

/// Active catalogue filter. `All` is the unfiltered state (`""` in the select box).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LevelFilter {
    #[default]
    All,
    Only(Level),
}

impl LevelFilter {
    /// The `level` query value to send, or `None` when the parameter must be omitted.
    #[must_use]
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            LevelFilter::All => None,
            LevelFilter::Only(level) => Some(level.as_str()),
        }
    }

    /// Value used by the filter select box; `""` means unfiltered.
    #[must_use]
    pub fn as_select_value(self) -> &'static str {
        self.query_value().unwrap_or("")
    }
}

impl FromStr for LevelFilter {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(LevelFilter::All);
        }
        s.parse().map(LevelFilter::Only)
    }
}

impl From<Level> for LevelFilter {
    fn from(level: Level) -> Self {
        LevelFilter::Only(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_omits_query_value() {
        let filter: LevelFilter = "".parse().unwrap();
        assert_eq!(filter, LevelFilter::All);
        assert_eq!(filter.query_value(), None);
        assert_eq!(filter.as_select_value(), "");
    }

    #[test]
    fn level_filter_round_trips_select_value() {
        for level in Level::ALL {
            let filter: LevelFilter = level.as_str().parse().unwrap();
            assert_eq!(filter, LevelFilter::Only(level));
            assert_eq!(filter.as_select_value(), level.as_str());
        }
    }

    #[test]
    fn unknown_level_is_rejected() {
        let err = "Expert".parse::<LevelFilter>().unwrap_err();
        assert_eq!(err, LevelError::Unknown("Expert".to_string()));
    }
}
