//! Tournament results storage and reporting

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tennis_core::{Competitor, Decision, MatchResult};
use thiserror::Error;

use crate::settings::SimulationSettings;

#[derive(Error, Debug)]
pub enum ResultsError {
    #[error("failed to access results file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode results: {0}")]
    Json(#[from] serde_json::Error),
}

/// Final condition of one competitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorSummary {
    pub name: String,
    pub seed: i32,
    pub style: String,
    pub fitness: f64,
    pub rivalries: BTreeMap<String, f64>,
}

impl From<&Competitor> for CompetitorSummary {
    fn from(c: &Competitor) -> Self {
        Self {
            name: c.name().to_string(),
            seed: c.seed(),
            style: c.style().to_string(),
            fitness: c.fitness(),
            rivalries: c.rivalries().clone(),
        }
    }
}

/// Complete tournament results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentResults {
    /// Name/description of the tournament
    pub name: String,
    /// Point model used for every match
    pub model: String,
    /// Participants in seed order, with their end-of-run condition
    pub participants: Vec<CompetitorSummary>,
    /// All match results in play order
    pub matches: Vec<MatchResult>,
    pub champion: Option<String>,
    /// Configuration used
    pub config: SimulationSettings,
}

impl TournamentResults {
    /// Save results to JSON file
    pub fn save(&self, path: &Path) -> Result<(), ResultsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load results from JSON file
    pub fn load(path: &Path) -> Result<Self, ResultsError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Number of rounds that produced at least one match
    pub fn rounds_played(&self) -> u32 {
        self.matches.iter().map(|m| m.round).max().unwrap_or(0)
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Tournament: {} ===\n\n", self.name));
        report.push_str(&format!(
            "Participants: {}\n",
            self.participants
                .iter()
                .map(|p| format!("{} ({})", p.name, p.seed))
                .collect::<Vec<_>>()
                .join(", ")
        ));
        report.push_str(&format!(
            "Config: best of {}, seed {}, model {}\n\n",
            self.config.best_of, self.config.seed, self.model
        ));

        report.push_str("Results:\n");
        report.push_str(&format!(
            "{:<6} {:<22} vs {:<22} {:<22} {}\n",
            "Round", "Player 1", "Player 2", "Score", "Winner"
        ));
        report.push_str(&"-".repeat(90));
        report.push('\n');

        for m in &self.matches {
            let winner = match m.decision {
                Decision::Played => m.winner().name.clone(),
                Decision::Walkover => format!("{} (walkover)", m.winner().name),
            };
            report.push_str(&format!(
                "{:<6} {:<22} vs {:<22} {:<22} {}\n",
                m.round,
                m.player1.name,
                m.player2.name,
                m.score_line(),
                winner
            ));
        }

        report.push_str(&format!(
            "\nChampion: {}\n",
            self.champion.as_deref().unwrap_or("none")
        ));

        report.push_str("\nFinal condition:\n");
        report.push_str(&format!("{:<22} {:>5} {:>8}\n", "Player", "Seed", "Fitness"));
        for p in &self.participants {
            report.push_str(&format!("{:<22} {:>5} {:>8.2}\n", p.name, p.seed, p.fitness));
        }

        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}
