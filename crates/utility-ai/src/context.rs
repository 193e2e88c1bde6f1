//! Per-tick views handed to user code.

use crate::events::{EventBus, EventKey, STOP_ORCHESTRATION, StopOrchestration};
use crate::intent::UserIntent;

/// Immutable context for one tick.
///
/// Built fresh by the orchestrator for every tick (and rebuilt after sensing);
/// only the bus carries state from one tick to the next.
#[derive(Debug, Clone, Copy)]
pub struct Runtime<'a> {
    bus: &'a EventBus,
    intent: &'a UserIntent,
    tick: u64,
}

impl<'a> Runtime<'a> {
    pub fn new(bus: &'a EventBus, intent: &'a UserIntent, tick: u64) -> Self {
        Self { bus, intent, tick }
    }

    pub fn bus(&self) -> &'a EventBus {
        self.bus
    }

    pub fn intent(&self) -> &'a UserIntent {
        self.intent
    }

    /// Zero-based tick index.
    pub fn tick(&self) -> u64 {
        self.tick
    }
}

/// Context given to sensors: the tick's data plus write access to the bus.
pub struct SensorContext<'a> {
    bus: &'a mut EventBus,
    intent: &'a UserIntent,
    tick: u64,
}

impl<'a> SensorContext<'a> {
    pub fn new(bus: &'a mut EventBus, intent: &'a UserIntent, tick: u64) -> Self {
        Self { bus, intent, tick }
    }

    pub fn publish<T>(&mut self, key: &EventKey<T>, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.bus.publish(key, value);
    }

    /// Ask the orchestrator to stop once sensing completes.
    pub fn request_stop(&mut self, stop: StopOrchestration) {
        tracing::debug!(
            target: "utility_ai::bus",
            tick = self.tick,
            reason = %stop.reason,
            "stop requested"
        );
        self.bus.publish(&STOP_ORCHESTRATION, stop);
    }

    pub fn bus(&self) -> &EventBus {
        self.bus
    }

    pub fn intent(&self) -> &'a UserIntent {
        self.intent
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Read-only view of the current state, for sensors that evaluate the bus.
    pub fn runtime(&self) -> Runtime<'_> {
        Runtime::new(self.bus, self.intent, self.tick)
    }
}
