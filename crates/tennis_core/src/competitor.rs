//! Tournament participants and their evolving match condition.
//!
//! A [`Competitor`] carries fixed skill ratings from the roster plus state
//! that changes after every match: fitness drains with the number of games
//! played and a per-opponent rivalry score drifts with each head-to-head.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ConfigError;

/// Fitness of a fresh competitor
pub const FULL_FITNESS: f64 = 1.0;

/// Fitness never drains below this floor
pub const MIN_FITNESS: f64 = 0.5;

/// Mental toughness when the roster does not set one
pub const DEFAULT_MENTAL_TOUGHNESS: f64 = 0.7;

/// Rivalry score before two competitors have met
pub const NEUTRAL_RIVALRY: f64 = 0.5;

/// Rivalry adjustment per encounter
pub const RIVALRY_STEP: f64 = 0.1;

/// Fitness below which a competitor starts rationing effort
const TIRED_FITNESS: f64 = 0.8;

/// One row of roster input, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedRecord {
    pub name: String,
    pub seed: i32,
    pub style: String,
    pub serve_pct: f64,
    pub return_pct: f64,
    /// Optional column; blank or absent means the default
    #[serde(default)]
    pub mental_toughness: Option<f64>,
}

/// Read-only view of a competitor handed to a win probability model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureSnapshot {
    /// Baseline serve strength scaled by fitness
    pub serve: f64,
    /// Baseline return strength scaled by fitness
    pub ret: f64,
    pub fitness: f64,
    pub mental_toughness: f64,
}

/// A tournament participant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Competitor {
    name: String,
    seed: i32,
    style: String,
    serve_pct: f64,
    return_pct: f64,
    fitness: f64,
    mental_toughness: f64,
    rivalries: BTreeMap<String, f64>,
}

impl Competitor {
    /// Build a fresh competitor, validating the baseline ratings.
    pub fn new(
        name: impl Into<String>,
        seed: i32,
        style: impl Into<String>,
        serve_pct: f64,
        return_pct: f64,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        check_rating(&name, "serve_pct", serve_pct)?;
        check_rating(&name, "return_pct", return_pct)?;

        Ok(Self {
            name,
            seed,
            style: style.into(),
            serve_pct,
            return_pct,
            fitness: FULL_FITNESS,
            mental_toughness: DEFAULT_MENTAL_TOUGHNESS,
            rivalries: BTreeMap::new(),
        })
    }

    pub fn from_record(record: SeedRecord) -> Result<Self, ConfigError> {
        let competitor = Self::new(
            record.name,
            record.seed,
            record.style,
            record.serve_pct,
            record.return_pct,
        )?;
        match record.mental_toughness {
            Some(value) => competitor.with_mental_toughness(value),
            None => Ok(competitor),
        }
    }

    /// Replace the default mental toughness. Must lie in `[0, 1]`.
    pub fn with_mental_toughness(mut self, value: f64) -> Result<Self, ConfigError> {
        check_rating(&self.name, "mental_toughness", value)?;
        self.mental_toughness = value;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn serve_pct(&self) -> f64 {
        self.serve_pct
    }

    pub fn return_pct(&self) -> f64 {
        self.return_pct
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn mental_toughness(&self) -> f64 {
        self.mental_toughness
    }

    /// Head-to-head score against `opponent`, if they have met.
    pub fn rivalry_with(&self, opponent: &str) -> Option<f64> {
        self.rivalries.get(opponent).copied()
    }

    pub fn rivalries(&self) -> &BTreeMap<String, f64> {
        &self.rivalries
    }

    /// Current features for point-probability scoring.
    pub fn features(&self) -> FeatureSnapshot {
        FeatureSnapshot {
            serve: self.serve_pct * self.fitness,
            ret: self.return_pct * self.fitness,
            fitness: self.fitness,
            mental_toughness: self.mental_toughness,
        }
    }

    /// Drain fitness after a match of `match_length` games.
    ///
    /// Three games cost 0.1 fitness. Winner and loser pay the same price.
    pub fn apply_fatigue(&mut self, match_length: u32) {
        let fatigue = 0.1 * (match_length as f64 / 3.0);
        self.fitness = (self.fitness - fatigue).max(MIN_FITNESS);
    }

    /// Shift the rivalry score against `opponent` after an encounter.
    pub fn update_rivalry(&mut self, opponent: &str, won: bool) {
        let score = self
            .rivalries
            .entry(opponent.to_string())
            .or_insert(NEUTRAL_RIVALRY);
        let adjustment = if won { RIVALRY_STEP } else { -RIVALRY_STEP };
        *score = (*score + adjustment).clamp(0.0, 1.0);
    }

    /// Describe how this competitor intends to approach `opponent`.
    ///
    /// `notes` are recalled narrative notes about this competitor, most
    /// recent first. Every recalled note is quoted, in that order.
    pub fn decide_strategy(&self, opponent: &Competitor, notes: &[String]) -> String {
        let mut plan = format!(
            "Play to {} strengths while adapting to {} (fitness {:.2}, toughness {:.2})",
            self.style, opponent.style, self.fitness, self.mental_toughness
        );

        if self.mental_toughness > opponent.mental_toughness {
            plan.push_str("; drag the big points into long rallies");
        } else if self.mental_toughness < opponent.mental_toughness {
            plan.push_str("; strike first on the big points");
        }

        if self.fitness < TIRED_FITNESS {
            plan.push_str("; shorten points to save legs");
        }

        match self.rivalry_with(&opponent.name) {
            Some(score) if score > NEUTRAL_RIVALRY => {
                plan.push_str("; press the head-to-head edge")
            }
            Some(score) if score < NEUTRAL_RIVALRY => {
                plan.push_str("; reset after the last meeting")
            }
            _ => {}
        }

        if !notes.is_empty() {
            plan.push_str(&format!(" (recalling: {})", notes.join(" | ")));
        }

        plan
    }
}

fn check_rating(name: &str, field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::RatingOutOfRange {
            name: name.to_string(),
            field,
            value,
        })
    }
}

#[cfg(test)]
#[path = "competitor_tests.rs"]
mod competitor_tests;
