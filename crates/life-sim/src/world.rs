//! Simulated world shared between the sensor and the actions.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use utility_ai::{EventKey, clamp01};

/// Bus slot carrying the per-tick world snapshot.
pub const WORLD: EventKey<WorldState> = EventKey::named("life_sim.world");

/// Needs and resources of the simulated person. Every gauge is in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    /// 0 = full, 1 = starving.
    pub hunger: f64,
    /// 0 = exhausted, 1 = fully rested.
    pub energy: f64,
    pub money: f64,
    /// 0 = midnight, 0.5 = noon.
    pub time_of_day: f64,
    pub meals_eaten: u32,
    pub hours_worked: u32,
}

impl Default for WorldState {
    fn default() -> Self {
        Self {
            hunger: 0.3,
            energy: 0.7,
            money: 0.2,
            time_of_day: 0.3,
            meals_eaten: 0,
            hours_worked: 0,
        }
    }
}

impl WorldState {
    /// Time step per tick (about fourteen ticks per day).
    pub const TIME_STEP: f64 = 0.07;
    /// Fraction of money kept when a day rolls over.
    pub const DAILY_MONEY_RETENTION: f64 = 0.98;

    /// Natural drift of one tick: time passes, hunger grows, energy drains.
    pub fn advance(&mut self) {
        self.time_of_day = clamp01(self.time_of_day + Self::TIME_STEP);
        self.hunger = clamp01(self.hunger + 0.08);
        self.energy = clamp01(self.energy - 0.05);

        if self.time_of_day >= 1.0 {
            self.time_of_day = 0.0;
            self.money = clamp01(self.money * Self::DAILY_MONEY_RETENTION);
        }
    }

    pub fn eat(&mut self) {
        self.hunger = clamp01(self.hunger - 0.6);
        self.energy = clamp01(self.energy + 0.1);
        self.money = clamp01(self.money - 0.05);
        self.meals_eaten += 1;
    }

    pub fn work(&mut self) {
        self.money = clamp01(self.money + 0.15);
        self.energy = clamp01(self.energy - 0.2);
        self.hunger = clamp01(self.hunger + 0.1);
        self.hours_worked += 1;
    }

    pub fn sleep(&mut self) {
        self.energy = clamp01(self.energy + 0.6);
        self.hunger = clamp01(self.hunger + 0.02);
    }

    /// Closeness to midnight: 1 at midnight, 0 from noon on.
    pub fn night(&self) -> f64 {
        if self.time_of_day < 0.5 {
            1.0 - self.time_of_day * 2.0
        } else {
            0.0
        }
    }
}

/// Handle to the one mutable world, cloned into the sensor and every action.
#[derive(Debug, Clone, Default)]
pub struct SharedWorld {
    inner: Arc<Mutex<WorldState>>,
}

impl SharedWorld {
    pub fn new(state: WorldState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, WorldState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> WorldState {
        self.lock().clone()
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut WorldState) -> R) -> R {
        f(&mut *self.lock())
    }
}
