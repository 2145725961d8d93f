//! Point win probability models.
//!
//! The match engine only ever asks one question: how likely is the server
//! to win the next point? Anything that can answer it from two
//! [`FeatureSnapshot`]s can drive a match.

use crate::competitor::FeatureSnapshot;

/// Trait implemented by every point-scoring model.
///
/// This allows swapping the serve/return heuristic for a fitted model
/// without touching the match engine.
pub trait WinProbabilityModel: Send + Sync {
    /// Probability in `[0, 1]` that `server` wins the next point against `receiver`.
    fn win_probability(&self, server: &FeatureSnapshot, receiver: &FeatureSnapshot) -> f64;

    /// Short identifier used in logs and reports
    fn name(&self) -> &str;
}

impl<M: WinProbabilityModel + ?Sized> WinProbabilityModel for Box<M> {
    fn win_probability(&self, server: &FeatureSnapshot, receiver: &FeatureSnapshot) -> f64 {
        (**self).win_probability(server, receiver)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Default model: average of effective serve and return win rates.
///
/// Each side's raw score is the mean of its own fitness-scaled serve rate
/// and `1 - opponent serve rate`; the server's share of the two raw scores
/// is its point probability.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServeReturnHeuristic;

impl WinProbabilityModel for ServeReturnHeuristic {
    fn win_probability(&self, server: &FeatureSnapshot, receiver: &FeatureSnapshot) -> f64 {
        let server_raw = (server.serve + (1.0 - receiver.serve)) / 2.0;
        let receiver_raw = (receiver.serve + (1.0 - server.serve)) / 2.0;

        let total = server_raw + receiver_raw;
        if total == 0.0 {
            return 0.5;
        }
        server_raw / total
    }

    fn name(&self) -> &str {
        "serve-return-heuristic"
    }
}

/// Constant point probability for the server, regardless of features.
#[derive(Debug, Clone, Copy)]
pub struct FixedProbability(f64);

impl FixedProbability {
    /// Values outside `[0, 1]` are clamped and NaN becomes 0.5.
    pub fn new(p: f64) -> Self {
        Self(bounded(p))
    }
}

impl WinProbabilityModel for FixedProbability {
    fn win_probability(&self, _server: &FeatureSnapshot, _receiver: &FeatureSnapshot) -> f64 {
        self.0
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Force a model answer into `[0, 1]`. NaN carries no information, so it
/// counts as an even point.
pub(crate) fn bounded(p: f64) -> f64 {
    if p.is_nan() {
        0.5
    } else {
        p.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "probability_tests.rs"]
mod probability_tests;
