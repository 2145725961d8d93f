//! Driver loop: plays rounds until a champion is left.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::{self, Write};
use tennis_core::{
    BracketManager, Competitor, ConfigError, MatchEngine, ServeReturnHeuristic,
    WinProbabilityModel,
};
use tracing::{info, warn};

use crate::display::TextDisplay;
use crate::results::{CompetitorSummary, TournamentResults};
use crate::settings::SimulationSettings;

/// A configured tournament, ready to run.
pub struct Simulator {
    name: String,
    bracket: BracketManager<ChaCha8Rng>,
    settings: SimulationSettings,
}

impl Simulator {
    /// Build a tournament with the default serve/return model.
    pub fn new(
        name: impl Into<String>,
        competitors: Vec<Competitor>,
        settings: SimulationSettings,
    ) -> Result<Self, ConfigError> {
        Self::with_model(name, competitors, settings, Box::new(ServeReturnHeuristic))
    }

    pub fn with_model(
        name: impl Into<String>,
        competitors: Vec<Competitor>,
        settings: SimulationSettings,
        model: Box<dyn WinProbabilityModel>,
    ) -> Result<Self, ConfigError> {
        let engine = MatchEngine::new(settings.match_config(), model)?;
        let bracket = BracketManager::new(
            competitors,
            engine,
            ChaCha8Rng::seed_from_u64(settings.seed),
        )?
        .with_odd_field(settings.odd_field)
        .with_recall_limit(settings.notes_recall_limit);

        Ok(Self {
            name: name.into(),
            bracket,
            settings,
        })
    }

    pub fn bracket(&self) -> &BracketManager<ChaCha8Rng> {
        &self.bracket
    }

    /// Run to completion without display.
    pub fn run(&mut self) -> TournamentResults {
        self.run_inner::<io::Sink>(None)
    }

    /// Run to completion, showing each round as it is played.
    pub fn run_with_display<W: Write>(&mut self, display: &mut TextDisplay<W>) -> TournamentResults {
        self.run_inner(Some(display))
    }

    fn run_inner<W: Write>(&mut self, mut display: Option<&mut TextDisplay<W>>) -> TournamentResults {
        info!(
            tournament = %self.name,
            players = self.bracket.competitors().len(),
            seed = self.settings.seed,
            "tournament starting"
        );

        while !self.bracket.is_finished() {
            if let Some(d) = display.as_deref_mut() {
                frame("bracket", d.bracket(&self.bracket));
            }

            let round_results = self.bracket.run_current_round();

            if let Some(d) = display.as_deref_mut() {
                frame("round results", d.round_results(round_results));
            }
        }

        if let Some(d) = display {
            frame("champion", d.champion(self.bracket.champion()));
            frame("full results", d.full_results(self.bracket.results()));
        }

        self.results()
    }

    /// Snapshot of the run so far.
    pub fn results(&self) -> TournamentResults {
        TournamentResults {
            name: self.name.clone(),
            model: self.bracket.engine().model().name().to_string(),
            participants: self
                .bracket
                .competitors()
                .iter()
                .map(CompetitorSummary::from)
                .collect(),
            matches: self.bracket.results().to_vec(),
            champion: self.bracket.champion().map(|c| c.name().to_string()),
            config: self.settings.clone(),
        }
    }
}

fn frame(what: &str, result: io::Result<()>) {
    if let Err(err) = result {
        warn!(frame = what, %err, "display frame skipped");
    }
}

#[cfg(test)]
#[path = "simulator_tests.rs"]
mod simulator_tests;
