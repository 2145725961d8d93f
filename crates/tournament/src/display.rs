//! Plain-text rendering of the bracket, round results and champion.
//!
//! The display only ever reads bracket state. Write failures are returned
//! to the caller, which logs and skips the frame.

use rand::Rng;
use std::io::{self, Write};
use tennis_core::{BracketManager, Competitor, MatchResult};

const RULE_WIDTH: usize = 78;

/// Name of a round by the number of players still in it
pub fn round_label(round: u32, players: usize) -> String {
    match players {
        2 => "Final".to_string(),
        3 | 4 => "Semifinals".to_string(),
        5..=8 => "Quarterfinals".to_string(),
        _ => format!("Round {}", round),
    }
}

/// Writes tournament frames to any writer
pub struct TextDisplay<W: Write> {
    out: W,
}

impl TextDisplay<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TextDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Upcoming pairings of the current round
    pub fn bracket<R: Rng>(&mut self, bracket: &BracketManager<R>) -> io::Result<()> {
        let state = bracket.state();
        writeln!(
            self.out,
            "\n=== {} (round {}) ===",
            round_label(state.round, state.active.len()),
            state.round
        )?;
        writeln!(
            self.out,
            "{:<10} {:<28} {:<28} {:<10}",
            "Match", "Player 1", "Player 2", "Status"
        )?;
        writeln!(self.out, "{}", "-".repeat(RULE_WIDTH))?;

        for (i, (p1, p2)) in bracket.compute_pairings().into_iter().enumerate() {
            writeln!(
                self.out,
                "{:<10} {:<28} {:<28} {:<10}",
                format!("Match {}", i + 1),
                entrant(p1),
                entrant(p2),
                "Pending"
            )?;
        }
        if let Some(bye) = bracket.bye() {
            writeln!(
                self.out,
                "{:<10} {:<28} {:<28} {:<10}",
                "-",
                entrant(bye),
                "",
                "Bye"
            )?;
        }
        self.out.flush()
    }

    /// Scores, winners and the winner's plan for one round
    pub fn round_results(&mut self, results: &[MatchResult]) -> io::Result<()> {
        let Some(first) = results.first() else {
            return Ok(());
        };

        writeln!(self.out, "\n=== Round {} Results ===", first.round)?;
        writeln!(
            self.out,
            "{:<10} {:<24} {:<20} Strategy",
            "Match", "Score", "Winner"
        )?;
        writeln!(self.out, "{}", "-".repeat(RULE_WIDTH))?;

        for (i, result) in results.iter().enumerate() {
            writeln!(
                self.out,
                "{:<10} {:<24} {:<20} {}",
                format!("Match {}", i + 1),
                result.score_line(),
                result.winner().name,
                format!("{}: {}", result.winner().name, result.winner_strategy())
            )?;
        }
        self.out.flush()
    }

    pub fn champion(&mut self, champion: Option<&Competitor>) -> io::Result<()> {
        let Some(champion) = champion else {
            return Ok(());
        };

        let rule = "*".repeat(40);
        writeln!(self.out, "\n{}", rule)?;
        writeln!(self.out, "  Tournament Champion")?;
        writeln!(self.out)?;
        writeln!(self.out, "  {}", champion.name())?;
        writeln!(self.out, "  Seed:    {}", champion.seed())?;
        writeln!(self.out, "  Style:   {}", champion.style())?;
        writeln!(self.out, "  Fitness: {:.2}", champion.fitness())?;
        writeln!(self.out, "{}", rule)?;
        self.out.flush()
    }

    /// One line per match for the whole run
    pub fn full_results(&mut self, results: &[MatchResult]) -> io::Result<()> {
        writeln!(self.out, "\nFull Tournament Results:")?;
        for r in results {
            writeln!(
                self.out,
                "Round: {}, {} vs {}, Winner: {}, Score: {}",
                r.round,
                r.player1.name,
                r.player2.name,
                r.winner().name,
                r.score_line()
            )?;
        }
        self.out.flush()
    }
}

fn entrant(c: &Competitor) -> String {
    format!("{} ({})", c.name(), c.seed())
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod display_tests;
