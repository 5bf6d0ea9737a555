//! Sink port carrying evaluator findings to their subscriber.

use crate::deadline::domain::DeadlineFinding;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for finding sink operations.
pub type DeadlineFindingSinkResult<T> = Result<T, DeadlineFindingSinkError>;

/// Dispatch seam for deadline findings.
///
/// The evaluator forwards each finding once per watermark window; a
/// delivery failure is logged by the evaluator and the finding is not
/// retried until the window recurs.
#[async_trait]
pub trait DeadlineFindingSink: Send + Sync {
    /// Delivers one finding.
    ///
    /// # Errors
    ///
    /// Returns [`DeadlineFindingSinkError::Delivery`] when the subscriber
    /// could not take the finding.
    async fn forward(&self, finding: &DeadlineFinding) -> DeadlineFindingSinkResult<()>;
}

/// Errors returned by finding sink implementations.
#[derive(Debug, Clone, Error)]
pub enum DeadlineFindingSinkError {
    /// The subscriber failed to take the finding.
    #[error("finding delivery error: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl DeadlineFindingSinkError {
    /// Wraps a delivery error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
