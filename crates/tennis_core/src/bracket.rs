//! Single-elimination bracket progression.
//!
//! The bracket owns every competitor for the whole run. Each round the
//! surviving field is re-sorted by seed and folded in half (best seed
//! against worst seed), every pairing is played through the
//! [`MatchEngine`], both participants pay fatigue and update their
//! rivalry, and the winners form the next round's field.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, error, info, warn};

use crate::competitor::Competitor;
use crate::error::ConfigError;
use crate::match_engine::{MatchEngine, SetScore, Side};
use crate::notes::{InMemoryNotes, NotesStore};

/// Notes recalled per competitor when planning a match
pub const DEFAULT_RECALL_LIMIT: usize = 3;

/// What happens to the middle seed of an odd-sized field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OddFieldPolicy {
    /// Advances to the next round without playing
    #[default]
    Bye,
    /// Leaves the tournament without playing
    Eliminate,
}

/// How a match was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Played,
    /// The match could not be completed and the better seed advanced
    Walkover,
}

/// Name and seed of a match participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entrant {
    pub name: String,
    pub seed: i32,
}

impl Entrant {
    fn of(competitor: &Competitor) -> Self {
        Self {
            name: competitor.name().to_string(),
            seed: competitor.seed(),
        }
    }
}

/// Record of a single bracket match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub round: u32,
    pub player1: Entrant,
    pub player2: Entrant,
    pub winner: Side,
    /// Set scores as (player1 games, player2 games), in play order
    pub sets: Vec<SetScore>,
    /// Games played across all sets
    pub match_length: u32,
    pub strategy_p1: String,
    pub strategy_p2: String,
    pub decision: Decision,
}

impl MatchResult {
    pub fn winner(&self) -> &Entrant {
        match self.winner {
            Side::A => &self.player1,
            Side::B => &self.player2,
        }
    }

    pub fn loser(&self) -> &Entrant {
        match self.winner {
            Side::A => &self.player2,
            Side::B => &self.player1,
        }
    }

    /// Strategy annotation of the winner
    pub fn winner_strategy(&self) -> &str {
        match self.winner {
            Side::A => &self.strategy_p1,
            Side::B => &self.strategy_p2,
        }
    }

    /// Score as "6-4 3-6 7-5", or "w/o" for a walkover
    pub fn score_line(&self) -> String {
        if self.decision == Decision::Walkover {
            return "w/o".to_string();
        }
        self.sets
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Read-only view of the bracket for display.
#[derive(Debug, Clone, Serialize)]
pub struct BracketSnapshot<'a> {
    pub round: u32,
    pub active: Vec<&'a str>,
    pub results: &'a [MatchResult],
}

/// Drives a seeded field through single-elimination rounds.
pub struct BracketManager<R> {
    /// Every competitor, sorted by seed once at creation
    players: Vec<Competitor>,
    engine: MatchEngine,
    notes: Box<dyn NotesStore>,
    rng: R,
    odd_field: OddFieldPolicy,
    recall_limit: usize,
    round: u32,
    /// Indices into `players` still in the tournament
    active: Vec<usize>,
    results: Vec<MatchResult>,
}

impl<R: Rng> BracketManager<R> {
    /// Seed a new bracket. Names must be unique.
    ///
    /// Competitors with equal seeds keep their input order.
    pub fn new(
        mut competitors: Vec<Competitor>,
        engine: MatchEngine,
        rng: R,
    ) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for c in &competitors {
            if !seen.insert(c.name()) {
                return Err(ConfigError::DuplicateName(c.name().to_string()));
            }
        }

        competitors.sort_by_key(Competitor::seed);
        let active = (0..competitors.len()).collect();

        Ok(Self {
            players: competitors,
            engine,
            notes: Box::new(InMemoryNotes::new()),
            rng,
            odd_field: OddFieldPolicy::default(),
            recall_limit: DEFAULT_RECALL_LIMIT,
            round: 1,
            active,
            results: Vec::new(),
        })
    }

    pub fn with_notes(mut self, notes: Box<dyn NotesStore>) -> Self {
        self.notes = notes;
        self
    }

    pub fn with_odd_field(mut self, policy: OddFieldPolicy) -> Self {
        self.odd_field = policy;
        self
    }

    pub fn with_recall_limit(mut self, limit: usize) -> Self {
        self.recall_limit = limit;
        self
    }

    /// Current round number, starting at 1
    pub fn round(&self) -> u32 {
        self.round
    }

    /// All competitors in seed order
    pub fn competitors(&self) -> &[Competitor] {
        &self.players
    }

    pub fn competitor(&self, name: &str) -> Option<&Competitor> {
        self.players.iter().find(|c| c.name() == name)
    }

    /// Competitors still in the tournament, in seed order
    pub fn active(&self) -> Vec<&Competitor> {
        self.seeded_active()
            .into_iter()
            .map(|i| &self.players[i])
            .collect()
    }

    /// Every result so far, in play order
    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn notes(&self) -> &dyn NotesStore {
        self.notes.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.active.len() <= 1
    }

    /// The last competitor standing, once the bracket is finished.
    pub fn champion(&self) -> Option<&Competitor> {
        match self.active.as_slice() {
            [only] => Some(&self.players[*only]),
            _ => None,
        }
    }

    pub fn state(&self) -> BracketSnapshot<'_> {
        BracketSnapshot {
            round: self.round,
            active: self.active().into_iter().map(Competitor::name).collect(),
            results: &self.results,
        }
    }

    /// This round's pairings: best seed against worst seed, inward.
    pub fn compute_pairings(&self) -> Vec<(&Competitor, &Competitor)> {
        let (pairs, _) = self.pair_indices();
        pairs
            .into_iter()
            .map(|(a, b)| (&self.players[a], &self.players[b]))
            .collect()
    }

    /// The unpaired middle seed of an odd-sized field, if any.
    pub fn bye(&self) -> Option<&Competitor> {
        let (_, unpaired) = self.pair_indices();
        unpaired.map(|i| &self.players[i])
    }

    /// Play every pairing of the current round and advance the bracket.
    ///
    /// Returns this round's results. Does nothing once the bracket is
    /// finished.
    pub fn run_current_round(&mut self) -> &[MatchResult] {
        let start = self.results.len();
        if self.is_finished() {
            return &self.results[start..];
        }

        let (pairs, unpaired) = self.pair_indices();
        info!(
            round = self.round,
            players = self.active.len(),
            matches = pairs.len(),
            "starting round"
        );

        let mut survivors = Vec::with_capacity(pairs.len() + 1);
        for (a, b) in pairs {
            let result = self.play_pairing(a, b);
            survivors.push(match result.winner {
                Side::A => a,
                Side::B => b,
            });
            self.results.push(result);
        }

        if let Some(middle) = unpaired {
            let name = self.players[middle].name();
            match self.odd_field {
                OddFieldPolicy::Bye => {
                    warn!(round = self.round, competitor = name, "odd field, advancing on a bye");
                    survivors.push(middle);
                }
                OddFieldPolicy::Eliminate => {
                    warn!(
                        round = self.round,
                        competitor = name,
                        "odd field, eliminated without a match"
                    );
                }
            }
        }

        self.active = survivors;
        info!(round = self.round, remaining = self.active.len(), "round complete");
        self.round += 1;

        if let Some(champion) = self.champion() {
            info!(champion = champion.name(), "tournament finished");
        }

        &self.results[start..]
    }

    /// Run rounds until one competitor is left.
    pub fn run_to_completion(&mut self) -> Option<&Competitor> {
        while !self.is_finished() {
            self.run_current_round();
        }
        self.champion()
    }

    /// Active indices in seed order. Ties keep input order because
    /// `players` was stably sorted at creation.
    fn seeded_active(&self) -> Vec<usize> {
        let mut order = self.active.clone();
        order.sort_unstable();
        order
    }

    fn pair_indices(&self) -> (Vec<(usize, usize)>, Option<usize>) {
        let order = self.seeded_active();
        let count = order.len();
        if count < 2 {
            return (Vec::new(), None);
        }

        let pairs = (0..count / 2)
            .map(|i| (order[i], order[count - 1 - i]))
            .collect();
        let unpaired = if count % 2 == 1 {
            Some(order[count / 2])
        } else {
            None
        };
        (pairs, unpaired)
    }

    fn play_pairing(&mut self, a: usize, b: usize) -> MatchResult {
        let outcome = self
            .engine
            .simulate_match(&self.players[a], &self.players[b], &mut self.rng);

        let (winner, sets, decision) = match outcome {
            Ok(outcome) => (outcome.winner, outcome.sets, Decision::Played),
            Err(err) => {
                error!(
                    round = self.round,
                    player1 = self.players[a].name(),
                    player2 = self.players[b].name(),
                    %err,
                    "match abandoned, better seed advances"
                );
                (Side::A, Vec::new(), Decision::Walkover)
            }
        };
        let match_length = sets.iter().map(SetScore::games).sum();

        let (w, l) = match winner {
            Side::A => (a, b),
            Side::B => (b, a),
        };
        let winner_name = self.players[w].name().to_string();
        let loser_name = self.players[l].name().to_string();

        if decision == Decision::Played {
            self.players[w].apply_fatigue(match_length);
            self.players[l].apply_fatigue(match_length);
            self.players[w].update_rivalry(&loser_name, true);
            self.players[l].update_rivalry(&winner_name, false);
        }

        let strategy_p1 = self.plan(a, b);
        let strategy_p2 = self.plan(b, a);

        let result = MatchResult {
            round: self.round,
            player1: Entrant::of(&self.players[a]),
            player2: Entrant::of(&self.players[b]),
            winner,
            sets,
            match_length,
            strategy_p1,
            strategy_p2,
            decision,
        };
        debug!(
            round = result.round,
            winner = %winner_name,
            loser = %loser_name,
            score = %result.score_line(),
            "match complete"
        );

        let (won_note, lost_note) = match decision {
            Decision::Played => (
                format!(
                    "Won against {} in round {} with score {}",
                    loser_name,
                    self.round,
                    result.score_line()
                ),
                format!(
                    "Lost to {} in round {} with score {}",
                    winner_name,
                    self.round,
                    result.score_line()
                ),
            ),
            Decision::Walkover => (
                format!("Advanced past {} by walkover in round {}", loser_name, self.round),
                format!("Conceded a walkover to {} in round {}", winner_name, self.round),
            ),
        };
        self.remember(&winner_name, &won_note);
        self.remember(&loser_name, &lost_note);

        result
    }

    /// Strategy for `me` against `opponent`, with notes if the store answers.
    fn plan(&self, me: usize, opponent: usize) -> String {
        let player = &self.players[me];
        let notes = match self.notes.recall(player.name(), self.recall_limit) {
            Ok(notes) => notes,
            Err(err) => {
                warn!(competitor = player.name(), %err, "planning without notes");
                Vec::new()
            }
        };
        player.decide_strategy(&self.players[opponent], &notes)
    }

    fn remember(&mut self, competitor: &str, text: &str) {
        if let Err(err) = self.notes.record(competitor, text) {
            warn!(competitor, %err, "note not recorded");
        }
    }
}

impl<R> std::fmt::Debug for BracketManager<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BracketManager")
            .field("round", &self.round)
            .field("active", &self.active.len())
            .field("results", &self.results.len())
            .field("engine", &self.engine)
            .finish()
    }
}

#[cfg(test)]
#[path = "bracket_tests.rs"]
mod bracket_tests;
