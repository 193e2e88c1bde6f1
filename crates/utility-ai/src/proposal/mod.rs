//! Candidate actions and their utility.
//!
//! A [`Proposal`] pairs an [`Action`] with the evaluators that decide how
//! attractive it is this tick:
//!
//! - [`Eligibility`] gates are AND-ed; any `false` removes the proposal.
//! - [`Consideration`] values are combined by geometric mean, shaped by the
//!   proposal's temperature and scaled by its prior.
//!
//! # Utility Formula
//!
//! ```text
//! prior'  = max(clamp01(prior), EPS)
//! geom    = exp(mean(ln(max(clamp01(c_i), EPS))))
//! utility = clamp01(prior' * geom ^ max(temperature, EPS))
//! ```
//!
//! With no considerations the utility is `prior'`.

mod consideration;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

pub use consideration::{Consideration, Eligibility};

use crate::api::Action;
use crate::context::Runtime;

/// Floor applied before logarithms and exponents.
pub const EPS: f64 = 1e-6;

/// Clamp to `[0, 1]`, mapping NaN to `0`.
pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// One candidate action offered by a capability module for the current tick.
///
/// Proposals are rebuilt by their module every tick; all shared parts are
/// reference-counted so cloning is cheap.
#[derive(Clone)]
pub struct Proposal {
    id: String,
    considerations: Vec<Arc<dyn Consideration>>,
    eligibilities: Vec<Arc<dyn Eligibility>>,
    action: Arc<dyn Action>,
    prior: f64,
    temperature: f64,
    no_repeat: bool,
    json_output: Option<Value>,
}

impl Proposal {
    /// New proposal with prior `1.0`, temperature `1.0` and no evaluators.
    ///
    /// `id` is a label for reporting; it need not be unique.
    pub fn new(id: impl Into<String>, action: impl Action + 'static) -> Self {
        Self::from_shared(id, Arc::new(action))
    }

    /// New proposal reusing an action shared with other proposals.
    pub fn from_shared(id: impl Into<String>, action: Arc<dyn Action>) -> Self {
        Self {
            id: id.into(),
            considerations: Vec::new(),
            eligibilities: Vec::new(),
            action,
            prior: 1.0,
            temperature: 1.0,
            no_repeat: false,
            json_output: None,
        }
    }

    pub fn with_consideration(self, consideration: impl Consideration + 'static) -> Self {
        self.with_shared_consideration(Arc::new(consideration))
    }

    pub fn with_shared_consideration(mut self, consideration: Arc<dyn Consideration>) -> Self {
        self.considerations.push(consideration);
        self
    }

    pub fn with_eligibility(self, eligibility: impl Eligibility + 'static) -> Self {
        self.with_shared_eligibility(Arc::new(eligibility))
    }

    pub fn with_shared_eligibility(mut self, eligibility: Arc<dyn Eligibility>) -> Self {
        self.eligibilities.push(eligibility);
        self
    }

    /// Baseline weight in `[0, 1]`.
    pub fn with_prior(mut self, prior: f64) -> Self {
        self.prior = prior;
        self
    }

    /// Exponent on the geometric mean. Values above `1` sharpen low scores,
    /// values below `1` flatten them.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Skip this proposal on the tick right after one with the same id ran.
    pub fn with_no_repeat(mut self, no_repeat: bool) -> Self {
        self.no_repeat = no_repeat;
        self
    }

    /// Attach a free-form payload carried into reports.
    pub fn with_json_output(mut self, output: Value) -> Self {
        self.json_output = Some(output);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn considerations(&self) -> &[Arc<dyn Consideration>] {
        &self.considerations
    }

    pub fn eligibilities(&self) -> &[Arc<dyn Eligibility>] {
        &self.eligibilities
    }

    pub fn action(&self) -> &Arc<dyn Action> {
        &self.action
    }

    pub fn prior(&self) -> f64 {
        self.prior
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn no_repeat(&self) -> bool {
        self.no_repeat
    }

    pub fn json_output(&self) -> Option<&Value> {
        self.json_output.as_ref()
    }

    /// `true` when every gate passes. Stops at the first failing gate.
    pub fn is_eligible(&self, rt: &Runtime<'_>) -> bool {
        self.eligibilities.iter().all(|gate| gate.is_eligible(rt))
    }

    /// Utility in `[0, 1]` for the given tick.
    pub fn utility(&self, rt: &Runtime<'_>) -> f64 {
        let prior = clamp01(self.prior).max(EPS);
        if self.considerations.is_empty() {
            return clamp01(prior);
        }

        let log_sum: f64 = self
            .considerations
            .iter()
            .map(|c| clamp01(c.evaluate(rt)).max(EPS).ln())
            .sum();
        let geom = (log_sum / self.considerations.len() as f64).exp();
        let gamma = self.temperature.max(EPS);

        clamp01(prior * geom.powf(gamma))
    }
}

impl fmt::Debug for Proposal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proposal")
            .field("id", &self.id)
            .field("action", &self.action.name())
            .field("considerations", &self.considerations.len())
            .field("eligibilities", &self.eligibilities.len())
            .field("prior", &self.prior)
            .field("temperature", &self.temperature)
            .field("no_repeat", &self.no_repeat)
            .finish_non_exhaustive()
    }
}
