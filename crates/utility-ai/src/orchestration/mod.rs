//! Tick orchestration.
//!
//! - [`orchestrator`] drives the sense → propose → score → select → act loop
//! - [`selection`] picks the winner among scored candidates
//! - [`sink`] is the observer protocol and its stock implementations
//! - [`config`] holds the stop policy
//! - [`types`] are the values a run produces

pub mod config;
pub mod orchestrator;
pub mod selection;
pub mod sink;
pub mod types;

pub use config::OrchestratorConfig;
pub use orchestrator::{Orchestrator, UtilityAiOrchestrator};
pub use selection::{MaxUtilitySelection, SelectionStrategy, SoftmaxSelection};
pub use sink::{CompositeSink, NullSink, OrchestrationSink, RecordingSink, TracingSink};
pub use types::{
    CandidateSummary, OrchestrationStopReason, OrchestrationTick, RunSummary, ScoredProposal,
    TickSummary,
};
