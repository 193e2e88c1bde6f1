//! Actions that change the simulated world.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utility_ai::{Action, ActionError, CancellationToken};

use crate::world::{SharedWorld, WorldState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifeActivity {
    Eat,
    Work,
    Sleep,
}

impl LifeActivity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eat => "Eat",
            Self::Work => "Work",
            Self::Sleep => "Sleep",
        }
    }

    fn apply(self, world: &mut WorldState) {
        match self {
            Self::Eat => world.eat(),
            Self::Work => world.work(),
            Self::Sleep => world.sleep(),
        }
    }
}

impl fmt::Display for LifeActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spends `duration` on an activity, then applies its effect.
///
/// Cancelling while the activity is in progress leaves the world untouched.
pub struct LifeAction {
    activity: LifeActivity,
    world: SharedWorld,
    duration: Duration,
}

impl LifeAction {
    pub fn new(activity: LifeActivity, world: SharedWorld, duration: Duration) -> Self {
        Self {
            activity,
            world,
            duration,
        }
    }
}

#[async_trait]
impl Action for LifeAction {
    fn name(&self) -> &str {
        self.activity.as_str()
    }

    async fn execute(&self, cancel: &CancellationToken) -> Result<(), ActionError> {
        tokio::select! {
            _ = cancel.cancelled() => return Err(ActionError::Cancelled),
            _ = tokio::time::sleep(self.duration) => {}
        }

        let activity = self.activity;
        let world = self.world.update(|w| {
            activity.apply(w);
            w.clone()
        });
        tracing::debug!(
            %activity,
            hunger = world.hunger,
            energy = world.energy,
            money = world.money,
            "activity done"
        );
        Ok(())
    }
}
