//! Evaluators attached to a [`Proposal`](super::Proposal).

use crate::context::Runtime;

/// Soft factor of a proposal's utility.
///
/// Returns a value expected in `[0, 1]`. Out-of-range and NaN results are
/// clamped by the proposal, so implementations may return raw curve output.
///
/// Plain closures work directly:
///
/// ```ignore
/// let hunger = |rt: &Runtime<'_>| rt.bus().try_get(&WORLD).map_or(0.0, |w| w.hunger);
/// proposal.with_consideration(hunger);
/// ```
pub trait Consideration: Send + Sync {
    fn evaluate(&self, rt: &Runtime<'_>) -> f64;
}

impl<F> Consideration for F
where
    F: Fn(&Runtime<'_>) -> f64 + Send + Sync,
{
    fn evaluate(&self, rt: &Runtime<'_>) -> f64 {
        self(rt)
    }
}

/// Hard gate: a proposal failing any gate is never scored.
pub trait Eligibility: Send + Sync {
    fn is_eligible(&self, rt: &Runtime<'_>) -> bool;
}

impl<F> Eligibility for F
where
    F: Fn(&Runtime<'_>) -> bool + Send + Sync,
{
    fn is_eligible(&self, rt: &Runtime<'_>) -> bool {
        self(rt)
    }
}
