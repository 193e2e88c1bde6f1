//! Pluggable sources of proposals.
use crate::context::Runtime;
use crate::proposal::Proposal;

/// A source of candidate actions for one domain of behavior.
///
/// Different implementations can cover:
/// - Survival needs (eat, sleep)
/// - Economy (work, trade)
/// - Scripted or fixture behavior for tests
///
/// `propose` must be a pure read of the [`Runtime`]: build proposals, publish
/// nothing. Proposals are expected to be rebuilt every tick.
pub trait CapabilityModule: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Proposals for the current tick, possibly empty.
    fn propose(&self, rt: &Runtime<'_>) -> Vec<Proposal>;
}

impl<F> CapabilityModule for F
where
    F: Fn(&Runtime<'_>) -> Vec<Proposal> + Send + Sync,
{
    fn propose(&self, rt: &Runtime<'_>) -> Vec<Proposal> {
        self(rt)
    }
}
