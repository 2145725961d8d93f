//! Roster loading from CSV.
//!
//! Expected header: `name,seed,style,serve_pct,return_pct`, optionally
//! followed by `mental_toughness`. Every row is
//! validated before a single match is played; the first bad row aborts the
//! load with its line number.

use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use tennis_core::{Competitor, ConfigError, SeedRecord};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("failed to open roster {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("roster line {line}: {source}")]
    Malformed {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("roster line {line}: {source}")]
    Invalid {
        line: u64,
        #[source]
        source: ConfigError,
    },
}

/// Load and validate a roster file.
pub fn load_roster(path: &Path) -> Result<Vec<Competitor>, RosterError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| RosterError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    collect_roster(reader)
}

/// Parse a roster from any reader (header row required).
pub fn read_roster<R: Read>(input: R) -> Result<Vec<Competitor>, RosterError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);
    collect_roster(reader)
}

fn collect_roster<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<Competitor>, RosterError> {
    let mut competitors = Vec::new();
    let mut names = HashSet::new();

    for (i, row) in reader.deserialize::<SeedRecord>().enumerate() {
        // Header is line 1
        let line = i as u64 + 2;
        let record = row.map_err(|source| RosterError::Malformed { line, source })?;

        if !names.insert(record.name.clone()) {
            return Err(RosterError::Invalid {
                line,
                source: ConfigError::DuplicateName(record.name),
            });
        }

        let competitor =
            Competitor::from_record(record).map_err(|source| RosterError::Invalid { line, source })?;
        competitors.push(competitor);
    }

    tracing::debug!(players = competitors.len(), "roster loaded");
    Ok(competitors)
}

#[cfg(test)]
#[path = "roster_tests.rs"]
mod roster_tests;
