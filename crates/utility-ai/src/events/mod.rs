//! Cross-component signaling.
//!
//! Sensors publish world snapshots into the [`EventBus`]; considerations and
//! eligibilities read them back. The same latest-value mechanism carries
//! [`StopOrchestration`] requests.

mod bus;
mod stop;

pub use bus::{EventBus, EventKey};
pub use stop::{STOP_ORCHESTRATION, StopOrchestration};
