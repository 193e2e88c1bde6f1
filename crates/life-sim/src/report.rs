//! JSON report of a finished run.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use utility_ai::{RunSummary, TickSummary, UserIntent};

use crate::world::WorldState;

pub const REPORT_FILE: &str = "report.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimReport {
    pub session_id: String,
    pub intent: UserIntent,
    pub summary: RunSummary,
    pub ticks: Vec<TickSummary>,
    pub final_world: WorldState,
}

impl SimReport {
    /// Write the report as pretty JSON into `dir`, returning the file path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(REPORT_FILE);
        let json = serde_json::to_string_pretty(self).context("Failed to serialize report")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use utility_ai::{CandidateSummary, IntentGoal, OrchestrationStopReason};

    fn report() -> SimReport {
        SimReport {
            session_id: "session_1".into(),
            intent: UserIntent::new(IntentGoal::new("SurviveAndThrive")),
            summary: RunSummary {
                reason: OrchestrationStopReason::GoalAchieved,
                message: None,
                tick: 1,
                actions_executed: 1,
            },
            ticks: vec![TickSummary {
                tick: 0,
                candidates: vec![CandidateSummary {
                    id: "Work".into(),
                    utility: 0.46,
                }],
                chosen: "Work".into(),
                chosen_utility: 0.46,
                output: None,
            }],
            final_world: WorldState::default(),
        }
    }

    #[test]
    fn report_uses_readable_field_names() {
        let value = serde_json::to_value(report()).unwrap();

        assert_eq!(value["summary"]["reason"], "GoalAchieved");
        assert_eq!(value["ticks"][0]["chosen"], "Work");
        assert_eq!(value["final_world"]["meals_eaten"], 0);
    }

    #[test]
    fn writes_into_directory() {
        let dir = TempDir::new().unwrap();

        let path = report().write_to(dir.path()).unwrap();
        let written: SimReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(path, dir.path().join(REPORT_FILE));
        assert_eq!(written, report());
    }
}
