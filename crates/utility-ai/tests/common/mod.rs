//! Test doubles shared by the integration suites.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use utility_ai::{
    Action, ActionError, FnAction, OrchestrationSink, OrchestrationStopReason, Proposal, Runtime,
    ScoredProposal, Sensor, SensorContext, SensorError, StopOrchestration,
};

/// Shared action that counts its executions.
pub fn counting(name: &str, counter: &Arc<AtomicUsize>) -> Arc<dyn Action> {
    let counter = Arc::clone(counter);
    Arc::new(FnAction::new(name, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        std::future::ready(Ok::<(), ActionError>(()))
    }))
}

/// Action that always fails.
pub fn failing(name: &str) -> Arc<dyn Action> {
    let message = format!("{name} exploded");
    Arc::new(FnAction::new(name, move |_| {
        std::future::ready(Err::<(), _>(ActionError::failed(message.clone())))
    }))
}

/// Proposal with a single constant consideration.
pub fn constant(id: &str, action: &Arc<dyn Action>, value: f64) -> Proposal {
    Proposal::from_shared(id, Arc::clone(action)).with_consideration(move |_: &Runtime<'_>| value)
}

pub fn count(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}

/// Requests a stop once the given tick is sensed.
pub struct StopAt {
    pub tick: u64,
    pub reason: OrchestrationStopReason,
}

#[async_trait]
impl Sensor for StopAt {
    fn name(&self) -> &str {
        "stop-at"
    }

    async fn sense(&self, ctx: &mut SensorContext<'_>) -> Result<(), SensorError> {
        if ctx.tick() == self.tick {
            ctx.request_stop(StopOrchestration::new(self.reason).with_message("enough"));
        }
        Ok(())
    }
}

/// Fails on the given tick.
pub struct BrokenSensor {
    pub tick: u64,
}

#[async_trait]
impl Sensor for BrokenSensor {
    fn name(&self) -> &str {
        "broken"
    }

    async fn sense(&self, ctx: &mut SensorContext<'_>) -> Result<(), SensorError> {
        if ctx.tick() == self.tick {
            return Err(SensorError::failed("no signal"));
        }
        Ok(())
    }
}

/// Sink that logs each callback as `"<callback> <tick>"`.
#[derive(Default)]
pub struct EventLog {
    entries: Mutex<Vec<String>>,
}

impl EventLog {
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    pub fn stops(&self) -> usize {
        self.entries()
            .iter()
            .filter(|e| e.starts_with("stopped"))
            .count()
    }

    fn push(&self, entry: String) {
        self.entries.lock().unwrap().push(entry);
    }
}

impl OrchestrationSink for EventLog {
    fn on_tick_start(&self, rt: &Runtime<'_>) {
        self.push(format!("start {}", rt.tick()));
    }

    fn on_scored(&self, rt: &Runtime<'_>, scored: &[ScoredProposal]) {
        let ids: Vec<_> = scored.iter().map(|s| s.id()).collect();
        self.push(format!("scored {} {}", rt.tick(), ids.join(",")));
    }

    fn on_chosen(&self, rt: &Runtime<'_>, chosen: &Arc<Proposal>, _utility: f64) {
        self.push(format!("chosen {} {}", rt.tick(), chosen.id()));
    }

    fn on_acted(&self, rt: &Runtime<'_>, acted: &Arc<Proposal>) {
        self.push(format!("acted {} {}", rt.tick(), acted.id()));
    }

    fn on_stopped(&self, rt: &Runtime<'_>, reason: OrchestrationStopReason) {
        self.push(format!("stopped {} {reason}", rt.tick()));
    }
}
