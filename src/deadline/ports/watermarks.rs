//! Store port for per-task notice watermarks.

use crate::deadline::domain::DeadlineWatermark;
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for watermark store operations.
pub type WatermarkStoreResult<T> = Result<T, WatermarkStoreError>;

/// Persistence contract for deadline watermarks.
///
/// Watermarks must survive restarts; re-evaluation against the persisted
/// state is what keeps the evaluator idempotent.
#[async_trait]
pub trait WatermarkStore: Send + Sync {
    /// Finds the watermark for a task.
    ///
    /// Returns `None` when no notice has ever been recorded for the task.
    async fn find(&self, task_id: TaskId) -> WatermarkStoreResult<Option<DeadlineWatermark>>;

    /// Inserts or replaces the watermark for its task.
    async fn save(&self, watermark: &DeadlineWatermark) -> WatermarkStoreResult<()>;
}

/// Errors returned by watermark store implementations.
#[derive(Debug, Clone, Error)]
pub enum WatermarkStoreError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WatermarkStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
