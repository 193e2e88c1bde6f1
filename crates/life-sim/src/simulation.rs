//! Wiring of the life simulation into an orchestrator.

use utility_ai::{IntentGoal, OrchestratorConfig, UserIntent, UtilityAiOrchestrator};

use crate::capability::LifeCapability;
use crate::config::SimConfig;
use crate::sensors::DynamicWorldSensor;
use crate::world::SharedWorld;

pub const GOAL: &str = "SurviveAndThrive";

pub fn intent(session_id: &str) -> UserIntent {
    UserIntent::new(IntentGoal::new(GOAL)).with_request_id(session_id)
}

pub fn build_orchestrator(
    config: &SimConfig,
    policy: OrchestratorConfig,
    world: &SharedWorld,
) -> UtilityAiOrchestrator {
    UtilityAiOrchestrator::new()
        .add_sensor(DynamicWorldSensor::new(world.clone(), config.goal_money))
        .add_module(LifeCapability::new(world.clone(), config.action_delay()))
        .with_config(policy)
        .with_selection(config.selection_strategy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectionKind;
    use utility_ai::{CancellationToken, OrchestrationStopReason, RecordingSink};

    fn fast_config() -> SimConfig {
        SimConfig {
            action_delay_ms: 0,
            ..SimConfig::default()
        }
    }

    #[tokio::test]
    async fn reference_run_reaches_savings_goal() {
        let config = fast_config();
        let world = SharedWorld::default();
        let mut orchestrator = build_orchestrator(&config, OrchestratorConfig::default(), &world);
        let sink = RecordingSink::new();

        let summary = orchestrator
            .run(&intent("test"), config.max_ticks, &CancellationToken::new(), Some(&sink))
            .await
            .expect("simulation should not fail");

        let final_world = world.snapshot();
        assert_eq!(summary.reason, OrchestrationStopReason::GoalAchieved);
        assert_eq!(summary.actions_executed, summary.tick);
        assert!(final_world.money >= config.goal_money);
        assert!(final_world.hours_worked > 0);
        assert!(final_world.meals_eaten > 0);
        assert_eq!(sink.ticks().len() as u64, summary.actions_executed);
        assert_eq!(sink.chosen_ids().first().map(String::as_str), Some("Work"));
    }

    #[tokio::test]
    async fn short_budget_ends_with_max_ticks() {
        let config = SimConfig {
            max_ticks: 3,
            ..fast_config()
        };
        let world = SharedWorld::default();
        let mut orchestrator = build_orchestrator(&config, OrchestratorConfig::default(), &world);

        let summary = orchestrator
            .run(&intent("test"), config.max_ticks, &CancellationToken::new(), None)
            .await
            .expect("simulation should not fail");

        assert_eq!(summary.reason, OrchestrationStopReason::MaxTicksReached);
        assert_eq!(summary.actions_executed, 3);
    }

    #[tokio::test]
    async fn seeded_softmax_runs_are_reproducible() {
        let config = SimConfig {
            selection: SelectionKind::Softmax,
            seed: Some(11),
            ..fast_config()
        };

        let mut runs = Vec::new();
        for _ in 0..2 {
            let world = SharedWorld::default();
            let mut orchestrator =
                build_orchestrator(&config, OrchestratorConfig::default(), &world);
            let sink = RecordingSink::new();
            orchestrator
                .run(&intent("test"), config.max_ticks, &CancellationToken::new(), Some(&sink))
                .await
                .expect("simulation should not fail");
            runs.push(sink.chosen_ids());
        }

        assert_eq!(runs[0], runs[1]);
    }
}
