//! Tennis bracket simulator
//!
//! This crate wires the match engine from `tennis_core` to the outside world:
//! - Loading a seeded roster from CSV
//! - Reading simulation settings from TOML
//! - Showing the bracket and results round by round
//! - Saving a results report as JSON
//!
//! # Usage
//!
//! ```bash
//! # Run with tournament.toml in the current directory
//! cargo run -p tournament
//!
//! # Override the roster and seed, write results to JSON
//! cargo run -p tournament -- --players data/players.csv --seed 7 --output results.json
//! ```

mod display;
mod results;
mod roster;
mod settings;
mod simulator;

pub use display::*;
pub use results::*;
pub use roster::*;
pub use settings::*;
pub use simulator::*;
