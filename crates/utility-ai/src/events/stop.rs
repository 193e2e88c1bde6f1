//! Out-of-band request to end the run.

use serde::{Deserialize, Serialize};

use super::bus::EventKey;
use crate::orchestration::OrchestrationStopReason;

/// Reserved bus slot checked by the orchestrator right after sensing.
pub const STOP_ORCHESTRATION: EventKey<StopOrchestration> =
    EventKey::named("utility_ai.stop_orchestration");

/// Stop request any sensor can publish without holding the orchestrator.
///
/// The reason is reported verbatim to the sink and in the run summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopOrchestration {
    pub reason: OrchestrationStopReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StopOrchestration {
    pub fn new(reason: OrchestrationStopReason) -> Self {
        Self {
            reason,
            message: None,
        }
    }

    /// Shorthand for the common "goal achieved" stop.
    pub fn goal_achieved() -> Self {
        Self::new(OrchestrationStopReason::GoalAchieved)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
