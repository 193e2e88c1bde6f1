//! World sensing.

use async_trait::async_trait;
use utility_ai::{Sensor, SensorContext, SensorError, StopOrchestration};

use crate::world::{SharedWorld, WORLD};

/// Publishes the world and ends the run once the savings goal is met.
///
/// While the goal is open, the world first drifts by one tick and the
/// drifted state is what this tick's proposals are scored against.
pub struct DynamicWorldSensor {
    world: SharedWorld,
    goal_money: f64,
}

impl DynamicWorldSensor {
    pub fn new(world: SharedWorld, goal_money: f64) -> Self {
        Self { world, goal_money }
    }
}

#[async_trait]
impl Sensor for DynamicWorldSensor {
    fn name(&self) -> &str {
        "dynamic-world"
    }

    async fn sense(&self, ctx: &mut SensorContext<'_>) -> Result<(), SensorError> {
        let goal = self.goal_money;
        let (snapshot, achieved) = self.world.update(|world| {
            let achieved = world.money >= goal;
            if !achieved {
                world.advance();
            }
            (world.clone(), achieved)
        });

        let money = snapshot.money;
        ctx.publish(&WORLD, snapshot);

        if achieved {
            ctx.request_stop(
                StopOrchestration::goal_achieved()
                    .with_message(format!("saved {money:.2} of {goal:.2} goal")),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::WorldState;
    use utility_ai::{EventBus, OrchestrationStopReason, STOP_ORCHESTRATION, UserIntent};

    #[tokio::test]
    async fn publishes_drifted_world() {
        let world = SharedWorld::default();
        let sensor = DynamicWorldSensor::new(world.clone(), 0.8);
        let mut bus = EventBus::new();
        let intent = UserIntent::from_query("live");

        sensor
            .sense(&mut SensorContext::new(&mut bus, &intent, 0))
            .await
            .unwrap();

        let published = bus.get_or_default(&WORLD).unwrap();
        assert_eq!(published, world.snapshot());
        assert!(published.hunger > WorldState::default().hunger);
        assert!(!bus.contains(&STOP_ORCHESTRATION));
    }

    #[tokio::test]
    async fn requests_stop_when_goal_is_met() {
        let world = SharedWorld::new(WorldState {
            money: 0.85,
            ..WorldState::default()
        });
        let sensor = DynamicWorldSensor::new(world.clone(), 0.8);
        let mut bus = EventBus::new();
        let intent = UserIntent::from_query("live");

        sensor
            .sense(&mut SensorContext::new(&mut bus, &intent, 4))
            .await
            .unwrap();

        let stop = bus.try_get(&STOP_ORCHESTRATION).unwrap();
        assert_eq!(stop.reason, OrchestrationStopReason::GoalAchieved);
        assert_eq!(stop.message.as_deref(), Some("saved 0.85 of 0.80 goal"));
        assert_eq!(world.snapshot().hunger, WorldState::default().hunger);
    }
}
