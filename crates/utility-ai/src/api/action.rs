//! Executable commands carried by proposals.
use std::fmt;
use std::future::Future;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::errors::ActionError;

/// The executable part of a [`crate::Proposal`].
///
/// The orchestrator awaits `execute` to completion before starting the next
/// tick. It never interrupts a running action: implementations that can take
/// a while should watch `cancel` and return [`ActionError::Cancelled`].
#[async_trait]
pub trait Action: Send + Sync {
    /// Name used in logs and `Debug` output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    async fn execute(&self, cancel: &CancellationToken) -> Result<(), ActionError>;
}

/// Adapts an async closure into an [`Action`].
///
/// ```ignore
/// let action = FnAction::new("wave", |_cancel| async { Ok(()) });
/// ```
pub struct FnAction<F> {
    name: String,
    f: F,
}

impl<F> FnAction<F> {
    pub fn new<Fut>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(CancellationToken) -> Fut + Send + Sync,
        Fut: Future<Output = Result<(), ActionError>> + Send,
    {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> fmt::Debug for FnAction<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAction").field("name", &self.name).finish()
    }
}

#[async_trait]
impl<F, Fut> Action for FnAction<F>
where
    F: Fn(CancellationToken) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), ActionError>> + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self, cancel: &CancellationToken) -> Result<(), ActionError> {
        (self.f)(cancel.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn fn_action_runs_closure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let action = FnAction::new("count", move |_cancel| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        action.execute(&CancellationToken::new()).await.unwrap();
        action.execute(&CancellationToken::new()).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(action.name(), "count");
    }

    #[tokio::test]
    async fn fn_action_sees_cancellation() {
        let action = FnAction::new("wait", |cancel: CancellationToken| async move {
            if cancel.is_cancelled() {
                return Err(ActionError::Cancelled);
            }
            Ok(())
        });

        let token = CancellationToken::new();
        token.cancel();

        let err = action.execute(&token).await.unwrap_err();
        assert!(matches!(err, ActionError::Cancelled));
    }
}
