//! Tennis tournament core
//!
//! This crate provides:
//! - A point-by-point match engine (point → game → set → match)
//! - Pluggable point win probability models
//! - Competitor condition tracking (fatigue, rivalries)
//! - A seeded single-elimination bracket that drives the engine
//!
//! # Usage
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use tennis_core::{BracketManager, Competitor, MatchConfig, MatchEngine, ServeReturnHeuristic};
//!
//! let field = (1..=4)
//!     .map(|seed| Competitor::new(format!("Player {}", seed), seed, "all-court", 0.6, 0.4))
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//! let engine = MatchEngine::new(MatchConfig::default(), Box::new(ServeReturnHeuristic)).unwrap();
//! let mut bracket = BracketManager::new(field, engine, StdRng::seed_from_u64(7)).unwrap();
//!
//! while !bracket.is_finished() {
//!     bracket.run_current_round();
//! }
//! assert!(bracket.champion().is_some());
//! ```

pub mod bracket;
pub mod competitor;
pub mod error;
pub mod match_engine;
pub mod notes;
pub mod probability;

pub use bracket::*;
pub use competitor::*;
pub use error::*;
pub use match_engine::*;
pub use notes::*;
pub use probability::*;
