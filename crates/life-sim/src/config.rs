//! Simulation configuration structures and loaders.
use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use utility_ai::{MaxUtilitySelection, SelectionStrategy, SoftmaxSelection};

/// Which [`SelectionStrategy`] picks the winning proposal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionKind {
    #[default]
    Max,
    Softmax,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown selection strategy `{0}` (expected `max` or `softmax`)")]
pub struct ParseSelectionError(String);

impl FromStr for SelectionKind {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" => Ok(Self::Max),
            "softmax" => Ok(Self::Softmax),
            other => Err(ParseSelectionError(other.to_owned())),
        }
    }
}

/// Configuration of one simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub max_ticks: u64,
    pub goal_money: f64,
    pub action_delay_ms: u64,
    pub session_id: Option<String>,
    pub selection: SelectionKind,
    pub softmax_temperature: f64,
    pub seed: Option<u64>,
    pub write_report: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_ticks: 30,
            goal_money: 0.8,
            action_delay_ms: 50,
            session_id: None,
            selection: SelectionKind::Max,
            softmax_temperature: 0.1,
            seed: None,
            write_report: false,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `LIFE_SIM_MAX_TICKS` - Tick budget (default: 30)
    /// - `LIFE_SIM_GOAL_MONEY` - Savings that end the run (default: 0.8)
    /// - `LIFE_SIM_ACTION_DELAY_MS` - Time each activity takes (default: 50)
    /// - `LIFE_SIM_SESSION_ID` - Session identifier for logs (default: auto-generated)
    /// - `LIFE_SIM_SELECTION` - `max` or `softmax` (default: max)
    /// - `LIFE_SIM_SOFTMAX_TEMPERATURE` - Softmax temperature (default: 0.1)
    /// - `LIFE_SIM_SEED` - Seed for softmax selection (default: random)
    /// - `LIFE_SIM_REPORT` - Write a JSON report next to the log (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ticks) = read_env::<u64>("LIFE_SIM_MAX_TICKS") {
            config.max_ticks = ticks;
        }

        if let Some(goal) = read_env::<f64>("LIFE_SIM_GOAL_MONEY") {
            config.goal_money = utility_ai::clamp01(goal);
        }

        if let Some(delay) = read_env::<u64>("LIFE_SIM_ACTION_DELAY_MS") {
            config.action_delay_ms = delay;
        }

        config.session_id = env::var("LIFE_SIM_SESSION_ID").ok();

        // Unknown strategies keep the default
        if let Some(kind) = read_env::<SelectionKind>("LIFE_SIM_SELECTION") {
            config.selection = kind;
        }

        if let Some(temperature) = read_env::<f64>("LIFE_SIM_SOFTMAX_TEMPERATURE") {
            config.softmax_temperature = temperature;
        }

        config.seed = read_env::<u64>("LIFE_SIM_SEED");

        if let Some(report) = read_env::<bool>("LIFE_SIM_REPORT") {
            config.write_report = report;
        } else if env::var("LIFE_SIM_REPORT").is_ok() {
            // A bare variable counts as enabled
            config.write_report = true;
        }

        config
    }

    pub fn action_delay(&self) -> Duration {
        Duration::from_millis(self.action_delay_ms)
    }

    pub fn selection_strategy(&self) -> Box<dyn SelectionStrategy> {
        match (self.selection, self.seed) {
            (SelectionKind::Max, _) => Box::new(MaxUtilitySelection),
            (SelectionKind::Softmax, Some(seed)) => {
                Box::new(SoftmaxSelection::seeded(self.softmax_temperature, seed))
            }
            (SelectionKind::Softmax, None) => {
                Box::new(SoftmaxSelection::new(self.softmax_temperature))
            }
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    env::var(key).ok()?.parse().ok()
}
