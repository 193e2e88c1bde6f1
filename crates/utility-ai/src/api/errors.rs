//! Unified error types surfaced by the orchestration API.
//!
//! Normal terminations (no proposals, zero utility, tick budget, stop events)
//! are not errors; they come back as [`crate::RunSummary`]. The types here
//! cover failures of user code and broken internal contracts.
use thiserror::Error;

/// Boxed error used to carry failures out of user-provided sensors and actions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, OrchestrationError>;

#[derive(Debug, Error)]
pub enum OrchestrationError {
    #[error("sensor `{sensor}` failed during tick {tick}")]
    Sensor {
        sensor: String,
        tick: u64,
        #[source]
        source: SensorError,
    },

    #[error("action for proposal `{proposal}` failed during tick {tick}")]
    ActionFailed {
        proposal: String,
        tick: u64,
        #[source]
        source: ActionError,
    },

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Failure reported by an [`crate::Action`].
#[derive(Debug, Error)]
pub enum ActionError {
    /// The action observed the cancellation token and aborted cooperatively.
    #[error("action cancelled")]
    Cancelled,

    #[error("{0}")]
    Failed(String),

    #[error("action failed: {0}")]
    Other(#[source] BoxError),
}

impl ActionError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Failure reported by a [`crate::Sensor`].
#[derive(Debug, Error)]
pub enum SensorError {
    #[error("{0}")]
    Failed(String),

    #[error("sensor failed: {0}")]
    Other(#[source] BoxError),
}

impl SensorError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Contract breach of a [`crate::SelectionStrategy`].
///
/// The orchestrator stops on empty candidate sets before selecting, so this
/// only surfaces from a misbehaving custom strategy or a direct caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no proposals to select from")]
    NoCandidates,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntentError {
    #[error("invalid legacy intent arguments: expected 1 or 3 values, got {count}")]
    InvalidLegacyArguments { count: usize },
}
