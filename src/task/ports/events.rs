//! Event sink port carrying lifecycle events to their subscribers.

use crate::task::domain::TaskEvent;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for event sink operations.
pub type TaskEventSinkResult<T> = Result<T, TaskEventSinkError>;

/// Synchronous dispatch seam for lifecycle events.
///
/// Services publish after the corresponding store write commits. Delivery
/// failures are the publisher's to log; they never roll back the write.
#[async_trait]
pub trait TaskEventSink: Send + Sync {
    /// Delivers one lifecycle event.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEventSinkError::Delivery`] when the subscriber could
    /// not take the event.
    async fn publish(&self, event: &TaskEvent) -> TaskEventSinkResult<()>;
}

/// Errors returned by event sink implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskEventSinkError {
    /// The subscriber failed to take the event.
    #[error("event delivery error: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskEventSinkError {
    /// Wraps a delivery error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
