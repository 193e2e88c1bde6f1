//! User intent value object.
//!
//! The intent is what the agent is trying to accomplish for this run. The
//! core only threads it through [`crate::Runtime`]; interpreting goals and
//! slots is up to capability modules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::IntentError;

/// Named goal of an intent (e.g. `"SurviveAndThrive"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntentGoal {
    name: String,
}

impl IntentGoal {
    /// Goal used by [`UserIntent::from_query`].
    pub const UNSPECIFIED: &'static str = "unspecified";
    /// Goal used by [`UserIntent::legacy`].
    pub const LEGACY: &'static str = "legacy";

    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Free-form parameters of an intent. A slot may be present but unset.
pub type Slots = BTreeMap<String, Option<Value>>;

/// What the agent was asked to do.
///
/// Built once through the named constructors and `with_*` methods, then only
/// read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIntent {
    goal: IntentGoal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    slots: Option<Slots>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    locale: Option<String>,
}

impl UserIntent {
    pub fn new(goal: IntentGoal) -> Self {
        Self {
            goal,
            slots: None,
            request_id: None,
            locale: None,
        }
    }

    /// Free-text query captured into a `query` slot under the `unspecified` goal.
    pub fn from_query(query: impl Into<String>) -> Self {
        Self::new(IntentGoal::new(IntentGoal::UNSPECIFIED)).with_slot("query", query.into())
    }

    /// Legacy `(query, delivery, topic)` triple captured into slots under the `legacy` goal.
    pub fn legacy(
        query: impl Into<String>,
        delivery: impl Into<String>,
        topic: impl Into<String>,
    ) -> Self {
        Self::new(IntentGoal::new(IntentGoal::LEGACY))
            .with_slot("query", query.into())
            .with_slot("delivery", delivery.into())
            .with_slot("topic", topic.into())
    }

    /// Build from an untyped argument list (e.g. command-line words).
    ///
    /// One value maps to [`UserIntent::from_query`], three to
    /// [`UserIntent::legacy`]; any other count is rejected.
    pub fn from_legacy_args<S: AsRef<str>>(args: &[S]) -> Result<Self, IntentError> {
        match args {
            [query] => Ok(Self::from_query(query.as_ref())),
            [query, delivery, topic] => Ok(Self::legacy(
                query.as_ref(),
                delivery.as_ref(),
                topic.as_ref(),
            )),
            _ => Err(IntentError::InvalidLegacyArguments { count: args.len() }),
        }
    }

    /// Replace all slots.
    pub fn with_slots(mut self, slots: Slots) -> Self {
        self.slots = Some(slots);
        self
    }

    pub fn with_slot(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.slots
            .get_or_insert_with(Slots::new)
            .insert(key.into(), Some(value.into()));
        self
    }

    /// Declare a slot without a value.
    pub fn with_empty_slot(mut self, key: impl Into<String>) -> Self {
        self.slots
            .get_or_insert_with(Slots::new)
            .insert(key.into(), None);
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn goal(&self) -> &IntentGoal {
        &self.goal
    }

    pub fn slots(&self) -> Option<&Slots> {
        self.slots.as_ref()
    }

    /// Value of a slot; `None` when the slot is missing or unset.
    pub fn slot(&self, key: &str) -> Option<&Value> {
        self.slots.as_ref()?.get(key)?.as_ref()
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }
}
