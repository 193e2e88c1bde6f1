//! Orchestrator policy configuration.
use std::env;

use crate::proposal::EPS;

/// Policy knobs of the tick loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrchestratorConfig {
    /// Stop with `ZeroUtility` instead of acting when the best candidate is
    /// at or below `zero_threshold`.
    pub stop_at_zero: bool,
    /// Utility treated as zero. Vetoed proposals score `prior * EPS^gamma`,
    /// never a literal zero.
    pub zero_threshold: f64,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            stop_at_zero: true,
            zero_threshold: EPS,
        }
    }
}

impl OrchestratorConfig {
    pub fn with_stop_at_zero(mut self, stop_at_zero: bool) -> Self {
        self.stop_at_zero = stop_at_zero;
        self
    }

    pub fn with_zero_threshold(mut self, zero_threshold: f64) -> Self {
        self.zero_threshold = zero_threshold;
        self
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `UTILITY_AI_STOP_AT_ZERO` - Stop on zero utility (default: true)
    /// - `UTILITY_AI_ZERO_THRESHOLD` - Utility counted as zero (default: 1e-6)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(stop) = read_env::<bool>("UTILITY_AI_STOP_AT_ZERO") {
            config.stop_at_zero = stop;
        }

        // Negative or NaN thresholds fall back to the default
        if let Some(threshold) =
            read_env::<f64>("UTILITY_AI_ZERO_THRESHOLD").filter(|t| *t >= 0.0)
        {
            config.zero_threshold = threshold;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
