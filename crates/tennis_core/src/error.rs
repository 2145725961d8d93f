//! Error types for the match engine and bracket.

use thiserror::Error;

/// A competitor record or engine setting that cannot start a tournament.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("competitor name must not be empty")]
    EmptyName,

    #[error("duplicate competitor name: {0}")]
    DuplicateName(String),

    #[error("{name}: {field} must be within [0, 1], got {value}")]
    RatingOutOfRange {
        name: String,
        field: &'static str,
        value: f64,
    },

    #[error("best_of must be an odd number of at least 1, got {0}")]
    InvalidBestOf(u32),

    #[error("{0} safety cap must be greater than zero")]
    ZeroCap(&'static str),
}

/// Which loop tripped a safety cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Game,
    Set,
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Game => write!(f, "game"),
            Unit::Set => write!(f, "set"),
        }
    }
}

/// Failure while resolving a single match.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    #[error("{unit} did not finish within {limit} iterations")]
    NonTermination { unit: Unit, limit: u32 },
}

/// Failure reported by a notes store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NotesError {
    #[error("notes store unavailable: {0}")]
    Unavailable(String),
}
