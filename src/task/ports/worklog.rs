//! Store port for append-only work log persistence.

use crate::task::domain::{TaskId, WorkLog, WorkLogCorrection, WorkLogEntry, WorkLogId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for work log store operations.
pub type WorkLogStoreResult<T> = Result<T, WorkLogStoreError>;

/// Persistence contract for work logs and their corrections.
///
/// Entries are append-only: there is no update or delete. A correction is
/// a separate record attached to at most one entry.
#[async_trait]
pub trait WorkLogStore: Send + Sync {
    /// Appends a new work log entry.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogStoreError::DuplicateWorkLog`] when the identifier
    /// already exists.
    async fn append(&self, entry: &WorkLog) -> WorkLogStoreResult<()>;

    /// Finds an entry by identifier.
    ///
    /// Returns `None` when the entry does not exist.
    async fn find_by_id(&self, id: WorkLogId) -> WorkLogStoreResult<Option<WorkLog>>;

    /// Attaches a correction to its entry.
    ///
    /// Uniqueness is enforced here, atomically with the write, so two
    /// racing corrections cannot both land.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogStoreError::WorkLogNotFound`] when the corrected
    /// entry does not exist and [`WorkLogStoreError::CorrectionExists`] when
    /// the entry already carries a correction.
    async fn attach_correction(&self, correction: &WorkLogCorrection) -> WorkLogStoreResult<()>;

    /// Finds the correction attached to an entry, if any.
    async fn find_correction(
        &self,
        work_log_id: WorkLogId,
    ) -> WorkLogStoreResult<Option<WorkLogCorrection>>;

    /// Returns all entries referencing a task, newest first, each paired
    /// with its correction when one exists.
    ///
    /// Entries survive task deletion, so this may return records for a task
    /// identifier that no longer resolves.
    async fn list_for_task(&self, task_id: TaskId) -> WorkLogStoreResult<Vec<WorkLogEntry>>;
}

/// Errors returned by work log store implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkLogStoreError {
    /// An entry with the same identifier already exists.
    #[error("duplicate work log identifier: {0}")]
    DuplicateWorkLog(WorkLogId),

    /// The entry was not found.
    #[error("work log not found: {0}")]
    WorkLogNotFound(WorkLogId),

    /// The entry already carries a correction.
    #[error("work log {0} already carries a correction")]
    CorrectionExists(WorkLogId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkLogStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
