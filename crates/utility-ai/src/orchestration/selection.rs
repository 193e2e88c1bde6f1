//! Selection strategies.
//!
//! The orchestrator hands a strategy the scored candidates sorted by
//! descending utility (ties in gathering order) and executes whatever it
//! returns. Swapping the strategy changes how the winner is picked without
//! touching the tick loop.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::ScoredProposal;
use crate::api::SelectionError;

/// Picks one candidate out of a non-empty, utility-sorted slice.
pub trait SelectionStrategy: Send {
    fn select<'a>(
        &mut self,
        scored: &'a [ScoredProposal],
    ) -> Result<&'a ScoredProposal, SelectionError>;
}

impl<S: SelectionStrategy + ?Sized> SelectionStrategy for Box<S> {
    fn select<'a>(
        &mut self,
        scored: &'a [ScoredProposal],
    ) -> Result<&'a ScoredProposal, SelectionError> {
        (**self).select(scored)
    }
}

/// Always takes the first (highest-utility) candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxUtilitySelection;

impl SelectionStrategy for MaxUtilitySelection {
    fn select<'a>(
        &mut self,
        scored: &'a [ScoredProposal],
    ) -> Result<&'a ScoredProposal, SelectionError> {
        scored.first().ok_or(SelectionError::NoCandidates)
    }
}

/// Random pick weighted by `exp((utility - max) / temperature)`.
///
/// Lower temperatures approach [`MaxUtilitySelection`]; higher ones approach a
/// uniform pick. Seed it for reproducible runs.
#[derive(Debug, Clone)]
pub struct SoftmaxSelection {
    temperature: f64,
    rng: StdRng,
}

impl SoftmaxSelection {
    pub const MIN_TEMPERATURE: f64 = 1e-3;

    pub fn new(temperature: f64) -> Self {
        Self::with_rng(temperature, StdRng::from_entropy())
    }

    pub fn seeded(temperature: f64, seed: u64) -> Self {
        Self::with_rng(temperature, StdRng::seed_from_u64(seed))
    }

    fn with_rng(temperature: f64, rng: StdRng) -> Self {
        let temperature = if temperature.is_finite() {
            temperature.max(Self::MIN_TEMPERATURE)
        } else {
            1.0
        };
        Self { temperature, rng }
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}

impl SelectionStrategy for SoftmaxSelection {
    fn select<'a>(
        &mut self,
        scored: &'a [ScoredProposal],
    ) -> Result<&'a ScoredProposal, SelectionError> {
        let top = scored.first().ok_or(SelectionError::NoCandidates)?;
        if scored.len() == 1 {
            return Ok(top);
        }

        let max = scored
            .iter()
            .map(|s| s.utility)
            .fold(f64::NEG_INFINITY, f64::max);
        let weights: Vec<f64> = scored
            .iter()
            .map(|s| ((s.utility - max) / self.temperature).exp())
            .collect();
        let total: f64 = weights.iter().sum();

        let mut roll = self.rng.r#gen::<f64>() * total;
        for (candidate, weight) in scored.iter().zip(&weights) {
            if roll < *weight {
                return Ok(candidate);
            }
            roll -= weight;
        }

        // Rounding can leave a sliver past the last weight
        Ok(top)
    }
}
