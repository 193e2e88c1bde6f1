//! Values produced by the tick loop.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::proposal::Proposal;

/// Why a run ended.
///
/// `SensorFailed` and `ActionFailed` are reported to the sink before the run
/// returns the matching [`crate::OrchestrationError`]; every other reason ends
/// the run normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrchestrationStopReason {
    NoProposals,
    NoEligibleProposals,
    ZeroUtility,
    MaxTicksReached,
    Cancelled,
    GoalAchieved,
    SensorRequestedStop,
    SensorFailed,
    ActionFailed,
}

impl OrchestrationStopReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoProposals => "NoProposals",
            Self::NoEligibleProposals => "NoEligibleProposals",
            Self::ZeroUtility => "ZeroUtility",
            Self::MaxTicksReached => "MaxTicksReached",
            Self::Cancelled => "Cancelled",
            Self::GoalAchieved => "GoalAchieved",
            Self::SensorRequestedStop => "SensorRequestedStop",
            Self::SensorFailed => "SensorFailed",
            Self::ActionFailed => "ActionFailed",
        }
    }

    /// `true` for the reasons that come back as an error from `run`.
    pub fn is_failure(self) -> bool {
        matches!(self, Self::SensorFailed | Self::ActionFailed)
    }
}

impl fmt::Display for OrchestrationStopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposal with the utility it scored this tick.
#[derive(Debug, Clone)]
pub struct ScoredProposal {
    pub proposal: Arc<Proposal>,
    pub utility: f64,
}

impl ScoredProposal {
    pub fn new(proposal: Arc<Proposal>, utility: f64) -> Self {
        Self { proposal, utility }
    }

    pub fn id(&self) -> &str {
        self.proposal.id()
    }
}

/// One completed decision: what was on the table and what won.
#[derive(Debug, Clone)]
pub struct OrchestrationTick {
    pub tick: u64,
    pub scored: Vec<ScoredProposal>,
    pub chosen: Arc<Proposal>,
    pub chosen_utility: f64,
}

impl OrchestrationTick {
    /// Serializable view without the executable parts.
    pub fn summary(&self) -> TickSummary {
        TickSummary {
            tick: self.tick,
            candidates: self
                .scored
                .iter()
                .map(|s| CandidateSummary {
                    id: s.id().to_owned(),
                    utility: s.utility,
                })
                .collect(),
            chosen: self.chosen.id().to_owned(),
            chosen_utility: self.chosen_utility,
            output: self.chosen.json_output().cloned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub id: String,
    pub utility: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSummary {
    pub tick: u64,
    pub candidates: Vec<CandidateSummary>,
    pub chosen: String,
    pub chosen_utility: f64,
    /// Payload the winning proposal attached, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<serde_json::Value>,
}

/// Result of a run that ended without error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub reason: OrchestrationStopReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Tick index at which the run stopped (`max_ticks` when the budget ran out).
    pub tick: u64,
    pub actions_executed: u64,
}
