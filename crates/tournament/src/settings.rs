//! Simulation settings loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tennis_core::{MatchConfig, OddFieldPolicy, DEFAULT_RECALL_LIMIT};
use thiserror::Error;

/// Default settings file looked up by the CLI
pub const DEFAULT_SETTINGS_PATH: &str = "tournament.toml";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Complete settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub simulation: SimulationSettings,
    pub output: OutputSettings,
}

/// Tournament and match parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// CSV roster with name, seed, style, serve_pct, return_pct
    pub players_csv: PathBuf,
    /// Seed for the point sampler
    pub seed: u64,
    pub best_of: u32,
    pub odd_field: OddFieldPolicy,
    /// Notes recalled per competitor when planning a match
    pub notes_recall_limit: usize,
    pub max_points_per_game: u32,
    pub max_games_per_set: u32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        let engine = MatchConfig::default();
        Self {
            players_csv: PathBuf::from("data/players.csv"),
            seed: 42,
            best_of: engine.best_of,
            odd_field: OddFieldPolicy::default(),
            notes_recall_limit: DEFAULT_RECALL_LIMIT,
            max_points_per_game: engine.max_points_per_game,
            max_games_per_set: engine.max_games_per_set,
        }
    }
}

impl SimulationSettings {
    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            best_of: self.best_of,
            max_points_per_game: self.max_points_per_game,
            max_games_per_set: self.max_games_per_set,
        }
    }
}

/// What to show and where to write results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Print the bracket before and the results after every round
    pub live_display: bool,
    pub results_json: Option<PathBuf>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            live_display: true,
            results_json: None,
        }
    }
}

impl Settings {
    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self, SettingsError> {
        toml::from_str(contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }

    /// Load settings if the file exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Ok(Self::default())
        }
    }
}
