//! Store port for task and subtask persistence.

use crate::task::domain::{Subtask, SubtaskId, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Persistence contract for tasks and their subtasks.
///
/// Subtasks live behind the same port as their owning tasks so that
/// implementations can make parent-and-child writes atomic.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateTask`] when the task identifier
    /// already exists.
    async fn store(&self, task: &Task) -> TaskStoreResult<()>;

    /// Persists changes to an existing task.
    ///
    /// The write commits only when the incoming version directly follows
    /// the stored one; a lost optimistic-concurrency race surfaces as
    /// [`TaskStoreError::Conflict`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::TaskNotFound`] when the task does not exist
    /// and [`TaskStoreError::Conflict`] when the version check fails.
    async fn update(&self, task: &Task) -> TaskStoreResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Returns all tasks that still face their deadline (neither approved
    /// nor rejected), in no particular order.
    async fn list_open(&self) -> TaskStoreResult<Vec<Task>>;

    /// Deletes a task and every subtask attached to it, atomically.
    ///
    /// Policy checks (blocking deletion while subtasks exist, unless forced)
    /// belong to the caller; this method always cascades.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::TaskNotFound`] when the task does not exist.
    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()>;

    /// Atomically persists the updated parent task and inserts the new
    /// subtask record.
    ///
    /// The parent is written under the same version rules as [`update`],
    /// so a concurrent parent mutation surfaces as
    /// [`TaskStoreError::Conflict`] and leaves the subtask uninserted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::TaskNotFound`], [`TaskStoreError::Conflict`]
    /// or [`TaskStoreError::DuplicateSubtask`].
    ///
    /// [`update`]: TaskStore::update
    async fn insert_subtask(&self, parent: &Task, subtask: &Subtask) -> TaskStoreResult<()>;

    /// Persists changes to an existing subtask.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::SubtaskNotFound`] when the subtask does not
    /// exist.
    async fn update_subtask(&self, subtask: &Subtask) -> TaskStoreResult<()>;

    /// Finds a subtask by identifier.
    ///
    /// Returns `None` when the subtask does not exist.
    async fn find_subtask(&self, id: SubtaskId) -> TaskStoreResult<Option<Subtask>>;

    /// Returns the subtasks of a task in the parent's attachment order.
    async fn list_subtasks(&self, task_id: TaskId) -> TaskStoreResult<Vec<Subtask>>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// A subtask with the same identifier already exists.
    #[error("duplicate subtask identifier: {0}")]
    DuplicateSubtask(SubtaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The subtask was not found.
    #[error("subtask not found: {0}")]
    SubtaskNotFound(SubtaskId),

    /// A concurrent writer committed first; the caller must re-read.
    #[error(
        "concurrent update conflict on task {task_id}: proposed version {proposed} \
         does not follow stored version {stored}"
    )]
    Conflict {
        /// The contested task.
        task_id: TaskId,
        /// Version currently stored.
        stored: u64,
        /// Version the losing write proposed.
        proposed: u64,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
