//! The tick loop.
//!
//! Each tick walks the same stages in order:
//!
//! 1. **Sensing**: sensors refresh the bus, one after another.
//! 2. **Stop check**: a published [`StopOrchestration`] ends the run.
//! 3. **Gathering**: capability modules propose candidates.
//! 4. **Filtering**: eligibility gates and `no_repeat` drop candidates.
//! 5. **Scoring**: utilities are computed and sorted, best first.
//! 6. **Selecting**: the zero-utility policy, then the selection strategy.
//! 7. **Acting**: the winner's action is awaited to completion.
//!
//! Cancellation is only observed between ticks; a running action decides for
//! itself whether to honor the token.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::config::OrchestratorConfig;
use super::selection::{MaxUtilitySelection, SelectionStrategy};
use super::sink::{NullSink, OrchestrationSink};
use super::types::{OrchestrationStopReason, RunSummary, ScoredProposal};
use crate::api::{ActionError, CapabilityModule, OrchestrationError, Result, Sensor};
use crate::context::{Runtime, SensorContext};
use crate::events::{EventBus, STOP_ORCHESTRATION};
use crate::intent::UserIntent;
use crate::proposal::Proposal;

const TARGET: &str = "utility_ai::orchestrator";

/// Anything that can drive a run to completion.
#[async_trait]
pub trait Orchestrator: Send {
    /// Run at most `max_ticks` ticks for `intent`.
    ///
    /// Normal terminations return `Ok` with the stop reason; failures of user
    /// code return `Err` after the sink was told `on_stopped`.
    async fn run(
        &mut self,
        intent: &UserIntent,
        max_ticks: u64,
        cancel: &CancellationToken,
        sink: Option<&dyn OrchestrationSink>,
    ) -> Result<RunSummary>;
}

/// Utility-AI orchestrator: sense, propose, filter, score, select, act.
///
/// Sensors and modules run in registration order. The bus lives as long as
/// the orchestrator but is cleared at the start of every run.
pub struct UtilityAiOrchestrator {
    sensors: Vec<Box<dyn Sensor>>,
    modules: Vec<Box<dyn CapabilityModule>>,
    selection: Box<dyn SelectionStrategy>,
    config: OrchestratorConfig,
    bus: EventBus,
    last_executed: Option<String>,
}

impl Default for UtilityAiOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl UtilityAiOrchestrator {
    pub fn new() -> Self {
        Self {
            sensors: Vec::new(),
            modules: Vec::new(),
            selection: Box::new(MaxUtilitySelection),
            config: OrchestratorConfig::default(),
            bus: EventBus::new(),
            last_executed: None,
        }
    }

    pub fn add_sensor(mut self, sensor: impl Sensor + 'static) -> Self {
        self.sensors.push(Box::new(sensor));
        self
    }

    pub fn add_module(mut self, module: impl CapabilityModule + 'static) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the default [`MaxUtilitySelection`].
    pub fn with_selection(mut self, selection: impl SelectionStrategy + 'static) -> Self {
        self.selection = Box::new(selection);
        self
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Bus state as left by the last run.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Id of the most recently executed proposal in the current run.
    pub fn last_executed(&self) -> Option<&str> {
        self.last_executed.as_deref()
    }

    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// See [`Orchestrator::run`]. A `None` sink behaves like [`NullSink`].
    pub async fn run(
        &mut self,
        intent: &UserIntent,
        max_ticks: u64,
        cancel: &CancellationToken,
        sink: Option<&dyn OrchestrationSink>,
    ) -> Result<RunSummary> {
        let sink: &dyn OrchestrationSink = match sink {
            Some(sink) => sink,
            None => &NullSink::INSTANCE,
        };

        self.bus.clear();
        self.last_executed = None;
        let mut executed = 0u64;

        tracing::debug!(
            target: TARGET,
            goal = intent.goal().name(),
            max_ticks,
            sensors = self.sensors.len(),
            modules = self.modules.len(),
            "run started"
        );

        for tick in 0..max_ticks {
            sink.on_tick_start(&Runtime::new(&self.bus, intent, tick));

            if cancel.is_cancelled() {
                let rt = Runtime::new(&self.bus, intent, tick);
                return Ok(stop(sink, &rt, OrchestrationStopReason::Cancelled, None, executed));
            }

            // Sensing
            for sensor in &self.sensors {
                let mut ctx = SensorContext::new(&mut self.bus, intent, tick);
                if let Err(source) = sensor.sense(&mut ctx).await {
                    let name = sensor.name().to_owned();
                    tracing::error!(
                        target: TARGET,
                        tick,
                        sensor = %name,
                        error = %source,
                        "sensor failed"
                    );
                    let rt = Runtime::new(&self.bus, intent, tick);
                    stop(sink, &rt, OrchestrationStopReason::SensorFailed, None, executed);
                    return Err(OrchestrationError::Sensor {
                        sensor: name,
                        tick,
                        source,
                    });
                }
            }

            let rt = Runtime::new(&self.bus, intent, tick);

            if let Some(request) = rt.bus().try_get(&STOP_ORCHESTRATION) {
                let request = request.clone();
                return Ok(stop(sink, &rt, request.reason, request.message, executed));
            }

            // Gathering
            let proposals: Vec<Proposal> = self
                .modules
                .iter()
                .flat_map(|module| module.propose(&rt))
                .collect();
            tracing::debug!(target: TARGET, tick, count = proposals.len(), "gathered proposals");
            if proposals.is_empty() {
                return Ok(stop(sink, &rt, OrchestrationStopReason::NoProposals, None, executed));
            }

            // Filtering
            let previous = self.last_executed.as_deref();
            let eligible: Vec<Arc<Proposal>> = proposals
                .into_iter()
                .filter(|p| !(p.no_repeat() && Some(p.id()) == previous))
                .filter(|p| p.is_eligible(&rt))
                .map(Arc::new)
                .collect();
            tracing::debug!(target: TARGET, tick, count = eligible.len(), "eligible proposals");
            if eligible.is_empty() {
                return Ok(stop(
                    sink,
                    &rt,
                    OrchestrationStopReason::NoEligibleProposals,
                    None,
                    executed,
                ));
            }

            // Scoring: stable sort keeps gathering order among ties
            let mut scored: Vec<ScoredProposal> = eligible
                .into_iter()
                .map(|proposal| {
                    let utility = proposal.utility(&rt);
                    ScoredProposal::new(proposal, utility)
                })
                .collect();
            scored.sort_by(|a, b| b.utility.total_cmp(&a.utility));
            sink.on_scored(&rt, &scored);

            // Selecting
            let best = scored.first().map_or(0.0, |s| s.utility);
            if self.config.stop_at_zero && best <= self.config.zero_threshold {
                tracing::debug!(
                    target: TARGET,
                    tick,
                    best,
                    threshold = self.config.zero_threshold,
                    "best utility is zero"
                );
                return Ok(stop(sink, &rt, OrchestrationStopReason::ZeroUtility, None, executed));
            }

            let chosen = self.selection.select(&scored)?;
            let utility = chosen.utility;
            let chosen = Arc::clone(&chosen.proposal);
            tracing::debug!(target: TARGET, tick, id = chosen.id(), utility, "selected proposal");
            sink.on_chosen(&rt, &chosen, utility);

            // Acting
            match chosen.action().execute(cancel).await {
                Ok(()) => {}
                Err(ActionError::Cancelled) => {
                    tracing::debug!(target: TARGET, tick, id = chosen.id(), "action cancelled");
                    return Ok(stop(sink, &rt, OrchestrationStopReason::Cancelled, None, executed));
                }
                Err(source) => {
                    tracing::error!(
                        target: TARGET,
                        tick,
                        id = chosen.id(),
                        error = %source,
                        "action failed"
                    );
                    stop(sink, &rt, OrchestrationStopReason::ActionFailed, None, executed);
                    return Err(OrchestrationError::ActionFailed {
                        proposal: chosen.id().to_owned(),
                        tick,
                        source,
                    });
                }
            }

            executed += 1;
            self.last_executed = Some(chosen.id().to_owned());
            sink.on_acted(&rt, &chosen);
        }

        let rt = Runtime::new(&self.bus, intent, max_ticks);
        Ok(stop(sink, &rt, OrchestrationStopReason::MaxTicksReached, None, executed))
    }
}

#[async_trait]
impl Orchestrator for UtilityAiOrchestrator {
    async fn run(
        &mut self,
        intent: &UserIntent,
        max_ticks: u64,
        cancel: &CancellationToken,
        sink: Option<&dyn OrchestrationSink>,
    ) -> Result<RunSummary> {
        UtilityAiOrchestrator::run(self, intent, max_ticks, cancel, sink).await
    }
}

fn stop(
    sink: &dyn OrchestrationSink,
    rt: &Runtime<'_>,
    reason: OrchestrationStopReason,
    message: Option<String>,
    actions_executed: u64,
) -> RunSummary {
    if reason.is_failure() {
        tracing::warn!(
            target: TARGET,
            tick = rt.tick(),
            %reason,
            actions_executed,
            "orchestration aborted"
        );
    } else {
        tracing::info!(
            target: TARGET,
            tick = rt.tick(),
            %reason,
            actions_executed,
            "orchestration stopped"
        );
    }
    sink.on_stopped(rt, reason);
    RunSummary {
        reason,
        message,
        tick: rt.tick(),
        actions_executed,
    }
}
