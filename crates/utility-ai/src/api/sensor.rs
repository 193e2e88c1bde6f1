//! Asynchronous abstraction for pushing world state into the event bus.
use async_trait::async_trait;

use super::errors::SensorError;
use crate::context::SensorContext;

/// A pluggable writer of context state.
///
/// Sensors run once per tick, sequentially and in registration order, before
/// any proposal is gathered. They are the only stage allowed to publish to the
/// bus, which [`SensorContext`] enforces by holding the bus mutably.
///
/// A sensor may also end the run by publishing
/// [`crate::StopOrchestration`] under [`crate::STOP_ORCHESTRATION`].
#[async_trait]
pub trait Sensor: Send + Sync {
    /// Name used in logs and error reports.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Refresh the bus for the current tick.
    async fn sense(&self, ctx: &mut SensorContext<'_>) -> Result<(), SensorError>;
}
