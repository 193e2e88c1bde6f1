//! Observer protocol for the tick loop.
//!
//! Sinks see every stage of a run but never steer it: callbacks are
//! synchronous, return nothing, and are invoked in a fixed order per tick:
//!
//! ```text
//! on_tick_start -> on_scored -> on_chosen -> on_acted
//! ```
//!
//! A tick that ends the run replaces the tail with `on_stopped`, which is
//! delivered exactly once per run.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::types::{OrchestrationStopReason, OrchestrationTick, ScoredProposal, TickSummary};
use crate::context::Runtime;
use crate::proposal::Proposal;

/// Receives lifecycle callbacks from the orchestrator.
///
/// Every method defaults to a no-op so implementations only override what
/// they care about.
pub trait OrchestrationSink: Send + Sync {
    fn on_tick_start(&self, _rt: &Runtime<'_>) {}

    /// Candidates after scoring, sorted by descending utility.
    fn on_scored(&self, _rt: &Runtime<'_>, _scored: &[ScoredProposal]) {}

    fn on_chosen(&self, _rt: &Runtime<'_>, _chosen: &Arc<Proposal>, _utility: f64) {}

    fn on_acted(&self, _rt: &Runtime<'_>, _acted: &Arc<Proposal>) {}

    fn on_stopped(&self, _rt: &Runtime<'_>, _reason: OrchestrationStopReason) {}
}

impl<S: OrchestrationSink + ?Sized> OrchestrationSink for Arc<S> {
    fn on_tick_start(&self, rt: &Runtime<'_>) {
        (**self).on_tick_start(rt);
    }

    fn on_scored(&self, rt: &Runtime<'_>, scored: &[ScoredProposal]) {
        (**self).on_scored(rt, scored);
    }

    fn on_chosen(&self, rt: &Runtime<'_>, chosen: &Arc<Proposal>, utility: f64) {
        (**self).on_chosen(rt, chosen, utility);
    }

    fn on_acted(&self, rt: &Runtime<'_>, acted: &Arc<Proposal>) {
        (**self).on_acted(rt, acted);
    }

    fn on_stopped(&self, rt: &Runtime<'_>, reason: OrchestrationStopReason) {
        (**self).on_stopped(rt, reason);
    }
}

/// Sink that ignores everything. Used when a run is started without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NullSink {
    pub const INSTANCE: NullSink = NullSink;
}

impl OrchestrationSink for NullSink {}

/// Forwards every callback to each inner sink in registration order.
#[derive(Default, Clone)]
pub struct CompositeSink {
    sinks: Vec<Arc<dyn OrchestrationSink>>,
}

impl CompositeSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl OrchestrationSink + 'static) -> Self {
        self.sinks.push(Arc::new(sink));
        self
    }

    pub fn with_shared(mut self, sink: Arc<dyn OrchestrationSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl OrchestrationSink for CompositeSink {
    fn on_tick_start(&self, rt: &Runtime<'_>) {
        for sink in &self.sinks {
            sink.on_tick_start(rt);
        }
    }

    fn on_scored(&self, rt: &Runtime<'_>, scored: &[ScoredProposal]) {
        for sink in &self.sinks {
            sink.on_scored(rt, scored);
        }
    }

    fn on_chosen(&self, rt: &Runtime<'_>, chosen: &Arc<Proposal>, utility: f64) {
        for sink in &self.sinks {
            sink.on_chosen(rt, chosen, utility);
        }
    }

    fn on_acted(&self, rt: &Runtime<'_>, acted: &Arc<Proposal>) {
        for sink in &self.sinks {
            sink.on_acted(rt, acted);
        }
    }

    fn on_stopped(&self, rt: &Runtime<'_>, reason: OrchestrationStopReason) {
        for sink in &self.sinks {
            sink.on_stopped(rt, reason);
        }
    }
}

#[derive(Default)]
struct Recording {
    ticks: Vec<OrchestrationTick>,
    last_scored: Vec<ScoredProposal>,
    stopped: Option<(u64, OrchestrationStopReason)>,
}

/// Append-only log of decisions.
///
/// A tick is recorded as soon as a proposal is chosen, pairing it with the
/// scored snapshot it was picked from. A choice whose action then failed or
/// was cancelled is still recorded.
#[derive(Default)]
pub struct RecordingSink {
    state: Mutex<Recording>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, Recording> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn ticks(&self) -> Vec<OrchestrationTick> {
        self.state().ticks.clone()
    }

    pub fn summaries(&self) -> Vec<TickSummary> {
        self.state().ticks.iter().map(OrchestrationTick::summary).collect()
    }

    /// Ids of chosen proposals, in order.
    pub fn chosen_ids(&self) -> Vec<String> {
        self.state()
            .ticks
            .iter()
            .map(|t| t.chosen.id().to_owned())
            .collect()
    }

    pub fn stop_reason(&self) -> Option<OrchestrationStopReason> {
        self.state().stopped.map(|(_, reason)| reason)
    }

    /// Tick index reported with the stop.
    pub fn stop_tick(&self) -> Option<u64> {
        self.state().stopped.map(|(tick, _)| tick)
    }
}

impl OrchestrationSink for RecordingSink {
    fn on_tick_start(&self, _rt: &Runtime<'_>) {
        self.state().last_scored.clear();
    }

    fn on_scored(&self, _rt: &Runtime<'_>, scored: &[ScoredProposal]) {
        self.state().last_scored = scored.to_vec();
    }

    fn on_chosen(&self, rt: &Runtime<'_>, chosen: &Arc<Proposal>, utility: f64) {
        let mut state = self.state();
        let scored = std::mem::take(&mut state.last_scored);
        state.ticks.push(OrchestrationTick {
            tick: rt.tick(),
            scored,
            chosen: Arc::clone(chosen),
            chosen_utility: utility,
        });
    }

    fn on_stopped(&self, rt: &Runtime<'_>, reason: OrchestrationStopReason) {
        self.state().stopped = Some((rt.tick(), reason));
    }
}

/// Reports every callback through `tracing` under `utility_ai::sink`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl OrchestrationSink for TracingSink {
    fn on_tick_start(&self, rt: &Runtime<'_>) {
        tracing::debug!(target: "utility_ai::sink", tick = rt.tick(), "tick start");
    }

    fn on_scored(&self, rt: &Runtime<'_>, scored: &[ScoredProposal]) {
        for candidate in scored {
            tracing::debug!(
                target: "utility_ai::sink",
                tick = rt.tick(),
                id = candidate.id(),
                utility = candidate.utility,
                "scored"
            );
        }
    }

    fn on_chosen(&self, rt: &Runtime<'_>, chosen: &Arc<Proposal>, utility: f64) {
        tracing::info!(
            target: "utility_ai::sink",
            tick = rt.tick(),
            id = chosen.id(),
            utility,
            "chosen"
        );
    }

    fn on_acted(&self, rt: &Runtime<'_>, acted: &Arc<Proposal>) {
        tracing::debug!(target: "utility_ai::sink", tick = rt.tick(), id = acted.id(), "acted");
    }

    fn on_stopped(&self, rt: &Runtime<'_>, reason: OrchestrationStopReason) {
        tracing::info!(target: "utility_ai::sink", tick = rt.tick(), %reason, "stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ActionError, FnAction};
    use crate::events::EventBus;
    use crate::intent::UserIntent;

    fn proposal(id: &str) -> Arc<Proposal> {
        let action = FnAction::new(id, |_| std::future::ready(Ok::<(), ActionError>(())));
        Arc::new(Proposal::new(id, action))
    }

    #[derive(Default)]
    struct Counter {
        calls: Mutex<Vec<&'static str>>,
    }

    impl OrchestrationSink for Counter {
        fn on_tick_start(&self, _rt: &Runtime<'_>) {
            self.calls.lock().unwrap().push("start");
        }

        fn on_stopped(&self, _rt: &Runtime<'_>, _reason: OrchestrationStopReason) {
            self.calls.lock().unwrap().push("stop");
        }
    }

    #[test]
    fn composite_fans_out_in_order() {
        let first = Arc::new(Counter::default());
        let second = Arc::new(Counter::default());
        let composite = CompositeSink::new()
            .with_shared(first.clone())
            .with(NullSink::INSTANCE)
            .with_shared(second.clone());

        let bus = EventBus::new();
        let intent = UserIntent::from_query("q");
        let rt = Runtime::new(&bus, &intent, 0);
        composite.on_tick_start(&rt);
        composite.on_stopped(&rt, OrchestrationStopReason::NoProposals);

        assert_eq!(composite.len(), 3);
        assert_eq!(*first.calls.lock().unwrap(), vec!["start", "stop"]);
        assert_eq!(*second.calls.lock().unwrap(), vec!["start", "stop"]);
    }

    #[test]
    fn recording_pairs_choice_with_snapshot() {
        let sink = RecordingSink::new();
        let bus = EventBus::new();
        let intent = UserIntent::from_query("q");

        let a = proposal("a");
        let b = proposal("b");
        let scored = vec![
            ScoredProposal::new(a.clone(), 0.8),
            ScoredProposal::new(b.clone(), 0.3),
        ];

        let rt = Runtime::new(&bus, &intent, 0);
        sink.on_tick_start(&rt);
        sink.on_scored(&rt, &scored);
        sink.on_chosen(&rt, &a, 0.8);
        sink.on_acted(&rt, &a);

        let rt = Runtime::new(&bus, &intent, 1);
        sink.on_tick_start(&rt);
        sink.on_stopped(&rt, OrchestrationStopReason::GoalAchieved);

        let ticks = sink.ticks();
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].tick, 0);
        assert_eq!(ticks[0].scored.len(), 2);
        assert_eq!(ticks[0].chosen_utility, 0.8);
        assert_eq!(sink.chosen_ids(), vec!["a"]);
        assert_eq!(sink.stop_reason(), Some(OrchestrationStopReason::GoalAchieved));
        assert_eq!(sink.stop_tick(), Some(1));

        let summaries = sink.summaries();
        let summary = &summaries[0];
        assert_eq!(summary.chosen, "a");
        assert_eq!(summary.candidates[1].id, "b");
    }

    #[test]
    fn choice_is_recorded_even_when_action_fails() {
        let sink = RecordingSink::new();
        let bus = EventBus::new();
        let intent = UserIntent::from_query("q");
        let rt = Runtime::new(&bus, &intent, 0);
        let a = proposal("a");

        sink.on_tick_start(&rt);
        sink.on_scored(&rt, &[ScoredProposal::new(a.clone(), 0.5)]);
        sink.on_chosen(&rt, &a, 0.5);
        sink.on_stopped(&rt, OrchestrationStopReason::ActionFailed);

        let ticks = sink.ticks();
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].chosen.id(), "a");
        assert_eq!(ticks[0].scored.len(), 1);
        assert_eq!(sink.stop_reason(), Some(OrchestrationStopReason::ActionFailed));
    }
}
