//! Point-by-point match resolution.
//!
//! A match is a nest of win-by-two races: points make games (first to 4,
//! lead of 2), games make sets (first to 6, lead of 2, no tiebreak) and
//! sets make the match (majority of `best_of`). Every point is an
//! independent draw against the model's server probability.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::competitor::{Competitor, FeatureSnapshot};
use crate::error::{ConfigError, MatchError, Unit};
use crate::probability::{bounded, WinProbabilityModel};

/// Points needed to take a game
pub const POINTS_TO_WIN_GAME: u32 = 4;

/// Games needed to take a set
pub const GAMES_TO_WIN_SET: u32 = 6;

/// Required winning margin for games and sets
pub const WINNING_MARGIN: u32 = 2;

/// Configuration for a match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of sets; the first side past half wins
    pub best_of: u32,
    /// Points after which an unfinished game is abandoned
    pub max_points_per_game: u32,
    /// Games after which an unfinished set is abandoned
    pub max_games_per_set: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            best_of: 5,
            max_points_per_game: 10_000,
            max_games_per_set: 1_000,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.best_of == 0 || self.best_of % 2 == 0 {
            return Err(ConfigError::InvalidBestOf(self.best_of));
        }
        if self.max_points_per_game == 0 {
            return Err(ConfigError::ZeroCap("max_points_per_game"));
        }
        if self.max_games_per_set == 0 {
            return Err(ConfigError::ZeroCap("max_games_per_set"));
        }
        Ok(())
    }

    /// Sets a side must win to take the match
    pub fn sets_to_win(&self) -> u32 {
        self.best_of / 2 + 1
    }
}

/// One of the two competitors in a match, in the order they were passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Final point count of a game, from the server's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameScore {
    pub server: u32,
    pub receiver: u32,
}

impl GameScore {
    pub fn server_won(&self) -> bool {
        self.server > self.receiver
    }

    fn is_complete(&self) -> bool {
        won_by_two(self.server, self.receiver, POINTS_TO_WIN_GAME)
            || won_by_two(self.receiver, self.server, POINTS_TO_WIN_GAME)
    }
}

/// Games won in one set as `(side A, side B)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore(pub u32, pub u32);

impl SetScore {
    pub fn winner(&self) -> Side {
        if self.0 > self.1 {
            Side::A
        } else {
            Side::B
        }
    }

    /// Total games played in the set
    pub fn games(&self) -> u32 {
        self.0 + self.1
    }

    fn is_complete(&self) -> bool {
        won_by_two(self.0, self.1, GAMES_TO_WIN_SET) || won_by_two(self.1, self.0, GAMES_TO_WIN_SET)
    }
}

impl std::fmt::Display for SetScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.0, self.1)
    }
}

/// Winner and set-by-set score of a completed match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub winner: Side,
    pub sets: Vec<SetScore>,
}

impl MatchOutcome {
    pub fn sets_won(&self, side: Side) -> u32 {
        self.sets.iter().filter(|s| s.winner() == side).count() as u32
    }

    /// Games played across all sets; drives fatigue
    pub fn match_length(&self) -> u32 {
        self.sets.iter().map(SetScore::games).sum()
    }
}

fn won_by_two(leader: u32, trailer: u32, target: u32) -> bool {
    leader >= target && leader >= trailer + WINNING_MARGIN
}

/// Resolves matches with a pluggable point model.
pub struct MatchEngine {
    config: MatchConfig,
    model: Box<dyn WinProbabilityModel>,
}

impl std::fmt::Debug for MatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine")
            .field("config", &self.config)
            .field("model", &self.model.name())
            .finish()
    }
}

impl MatchEngine {
    pub fn new(
        config: MatchConfig,
        model: Box<dyn WinProbabilityModel>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, model })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn model(&self) -> &dyn WinProbabilityModel {
        self.model.as_ref()
    }

    /// Play one point. Returns true if the server wins it.
    pub fn simulate_point<R: Rng + ?Sized>(
        &self,
        server: &FeatureSnapshot,
        receiver: &FeatureSnapshot,
        rng: &mut R,
    ) -> bool {
        let p = bounded(self.model.win_probability(server, receiver));
        rng.gen::<f64>() < p
    }

    /// Play points until one side has 4 and leads by 2.
    pub fn simulate_game<R: Rng + ?Sized>(
        &self,
        server: &FeatureSnapshot,
        receiver: &FeatureSnapshot,
        rng: &mut R,
    ) -> Result<GameScore, MatchError> {
        let mut score = GameScore::default();

        for _ in 0..self.config.max_points_per_game {
            if self.simulate_point(server, receiver, rng) {
                score.server += 1;
            } else {
                score.receiver += 1;
            }
            if score.is_complete() {
                return Ok(score);
            }
        }

        Err(MatchError::NonTermination {
            unit: Unit::Game,
            limit: self.config.max_points_per_game,
        })
    }

    /// Play games until one side has 6 and leads by 2.
    ///
    /// Side A serves whenever an even number of games has been played.
    pub fn simulate_set<R: Rng + ?Sized>(
        &self,
        a: &FeatureSnapshot,
        b: &FeatureSnapshot,
        rng: &mut R,
    ) -> Result<SetScore, MatchError> {
        let mut score = SetScore(0, 0);

        for _ in 0..self.config.max_games_per_set {
            if score.games() % 2 == 0 {
                if self.simulate_game(a, b, rng)?.server_won() {
                    score.0 += 1;
                } else {
                    score.1 += 1;
                }
            } else if self.simulate_game(b, a, rng)?.server_won() {
                score.1 += 1;
            } else {
                score.0 += 1;
            }

            if score.is_complete() {
                return Ok(score);
            }
        }

        Err(MatchError::NonTermination {
            unit: Unit::Set,
            limit: self.config.max_games_per_set,
        })
    }

    /// Play sets until one side has won a majority of `best_of`.
    ///
    /// Competitor state is read once up front and never modified.
    pub fn simulate_match<R: Rng + ?Sized>(
        &self,
        a: &Competitor,
        b: &Competitor,
        rng: &mut R,
    ) -> Result<MatchOutcome, MatchError> {
        let a_features = a.features();
        let b_features = b.features();
        let sets_to_win = self.config.sets_to_win();

        let mut sets = Vec::with_capacity(self.config.best_of as usize);
        let (mut a_sets, mut b_sets) = (0, 0);

        loop {
            let set = self.simulate_set(&a_features, &b_features, rng)?;
            trace!(a = a.name(), b = b.name(), set = %set, "set complete");
            sets.push(set);

            match set.winner() {
                Side::A => a_sets += 1,
                Side::B => b_sets += 1,
            }

            if a_sets >= sets_to_win {
                return Ok(MatchOutcome {
                    winner: Side::A,
                    sets,
                });
            }
            if b_sets >= sets_to_win {
                return Ok(MatchOutcome {
                    winner: Side::B,
                    sets,
                });
            }
        }
    }
}

#[cfg(test)]
#[path = "match_engine_tests.rs"]
mod match_engine_tests;
