//! Survival and economy proposals for the simulated person.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use utility_ai::{
    Action, CapabilityModule, Consideration, Eligibility, Proposal, Runtime, clamp01,
};

use crate::actions::{LifeAction, LifeActivity};
use crate::curves::{exp_pow, inverse, sigmoid};
use crate::world::{SharedWorld, WORLD, WorldState};

/// Consideration computed from the published world snapshot; `0` when absent.
struct FromWorld(fn(&WorldState) -> f64);

impl Consideration for FromWorld {
    fn evaluate(&self, rt: &Runtime<'_>) -> f64 {
        rt.bus().try_get(&WORLD).map_or(0.0, |w| clamp01((self.0)(w)))
    }
}

/// Nothing is proposed as doable before the sensor published the world.
struct WorldAvailable;

impl Eligibility for WorldAvailable {
    fn is_eligible(&self, rt: &Runtime<'_>) -> bool {
        rt.bus().contains(&WORLD)
    }
}

struct Profile {
    activity: LifeActivity,
    action: Arc<dyn Action>,
    prior: f64,
    temperature: f64,
    considerations: Vec<Arc<dyn Consideration>>,
}

/// Proposes eating, working and sleeping every tick.
///
/// | activity | prior | temperature | considerations                              |
/// |----------|-------|-------------|---------------------------------------------|
/// | Eat      | 0.9   | 1.0         | hunger^2.2, sigmoid(1 - energy, 6, 0.4)     |
/// | Work     | 0.8   | 1.2         | (1 - money)^1.8, energy^1.2                 |
/// | Sleep    | 0.7   | 1.1         | (1 - energy)^2, sigmoid(night, 10, 0.3)     |
pub struct LifeCapability {
    profiles: Vec<Profile>,
    eligibility: Arc<dyn Eligibility>,
}

impl LifeCapability {
    pub fn new(world: SharedWorld, action_duration: Duration) -> Self {
        let action = |activity| -> Arc<dyn Action> {
            Arc::new(LifeAction::new(activity, world.clone(), action_duration))
        };
        let from = |f: fn(&WorldState) -> f64| -> Arc<dyn Consideration> { Arc::new(FromWorld(f)) };

        let profiles = vec![
            Profile {
                activity: LifeActivity::Eat,
                action: action(LifeActivity::Eat),
                prior: 0.9,
                temperature: 1.0,
                considerations: vec![
                    from(|w| exp_pow(w.hunger, 2.2)),
                    from(|w| sigmoid(inverse(w.energy), 6.0, 0.4)),
                ],
            },
            Profile {
                activity: LifeActivity::Work,
                action: action(LifeActivity::Work),
                prior: 0.8,
                temperature: 1.2,
                considerations: vec![
                    from(|w| exp_pow(inverse(w.money), 1.8)),
                    from(|w| exp_pow(w.energy, 1.2)),
                ],
            },
            Profile {
                activity: LifeActivity::Sleep,
                action: action(LifeActivity::Sleep),
                prior: 0.7,
                temperature: 1.1,
                considerations: vec![
                    from(|w| exp_pow(inverse(w.energy), 2.0)),
                    from(|w| sigmoid(w.night(), 10.0, 0.3)),
                ],
            },
        ];

        Self {
            profiles,
            eligibility: Arc::new(WorldAvailable),
        }
    }
}

impl CapabilityModule for LifeCapability {
    fn name(&self) -> &str {
        "life"
    }

    fn propose(&self, rt: &Runtime<'_>) -> Vec<Proposal> {
        let world = rt.bus().try_get(&WORLD);

        self.profiles
            .iter()
            .map(|profile| {
                let mut proposal =
                    Proposal::from_shared(profile.activity.as_str(), Arc::clone(&profile.action))
                        .with_prior(profile.prior)
                        .with_temperature(profile.temperature)
                        .with_shared_eligibility(Arc::clone(&self.eligibility));
                for consideration in &profile.considerations {
                    proposal = proposal.with_shared_consideration(Arc::clone(consideration));
                }
                if let Some(world) = world {
                    proposal = proposal.with_json_output(json!({
                        "activity": profile.activity,
                        "world": world,
                    }));
                }
                proposal
            })
            .collect()
    }
}
