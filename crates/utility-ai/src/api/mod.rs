//! Public extension surface.
//!
//! Agents plug world-specific logic into the orchestrator through the traits
//! gathered here, so the orchestration layer stays free of domain code.

pub mod action;
pub mod capability;
pub mod errors;
pub mod sensor;

pub use action::{Action, FnAction};
pub use capability::CapabilityModule;
pub use errors::{
    ActionError, BoxError, IntentError, OrchestrationError, Result, SelectionError, SensorError,
};
pub use sensor::Sensor;
