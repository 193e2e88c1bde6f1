//! Utility-based decision engine for autonomous agents.
//!
//! On every tick the orchestrator asks pluggable capability modules for
//! candidate [`Proposal`]s, drops the ones whose eligibility gates fail, scores
//! the rest with a multiplicative utility over independent considerations,
//! executes the winner and reports each stage to an [`OrchestrationSink`].
//!
//! Modules are organized by responsibility:
//! - [`api`] holds the extension traits (sensors, capability modules, actions) and errors
//! - [`events`] provides the latest-value [`EventBus`] and the stop-request event
//! - [`context`] defines the per-tick [`Runtime`] view and the sensing context
//! - [`intent`] is the user intent value object threaded through every tick
//! - [`proposal`] hosts the scorable candidate and its utility algorithm
//! - [`orchestration`] hosts the tick loop, selection strategies and sinks
pub mod api;
pub mod context;
pub mod events;
pub mod intent;
pub mod orchestration;
pub mod proposal;

pub use api::{
    Action, ActionError, BoxError, CapabilityModule, FnAction, IntentError, OrchestrationError,
    Result, SelectionError, Sensor, SensorError,
};
pub use context::{Runtime, SensorContext};
pub use events::{EventBus, EventKey, STOP_ORCHESTRATION, StopOrchestration};
pub use intent::{IntentGoal, Slots, UserIntent};
pub use orchestration::{
    CandidateSummary, CompositeSink, MaxUtilitySelection, NullSink, OrchestrationSink,
    OrchestrationStopReason, OrchestrationTick, Orchestrator, OrchestratorConfig, RecordingSink,
    RunSummary, ScoredProposal, SelectionStrategy, SoftmaxSelection, TickSummary, TracingSink,
    UtilityAiOrchestrator,
};
pub use proposal::{Consideration, EPS, Eligibility, Proposal, clamp01};

pub use tokio_util::sync::CancellationToken;
