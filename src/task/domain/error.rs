//! Error types for task domain validation and rule enforcement.

use super::{TaskId, UserId, WorkLogId, task::TaskStatus};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TaskDomainError {
    /// The title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The note text is empty after trimming.
    #[error("note must not be empty")]
    EmptyNote,

    /// The work description is empty after trimming.
    #[error("work description must not be empty")]
    EmptyWorkDescription,

    /// The due timestamp is not strictly in the future.
    #[error("due timestamp {due} is not in the future")]
    DueNotInFuture {
        /// The rejected due timestamp.
        due: DateTime<Utc>,
    },

    /// The hours-spent value is not a positive finite number.
    #[error("hours spent must be a positive finite number, got {hours}")]
    InvalidHours {
        /// The rejected hours value.
        hours: f64,
    },

    /// The work log already carries a correction entry.
    #[error("work log {0} has already been corrected")]
    WorkLogAlreadyCorrected(WorkLogId),

    /// The requested state edge is not part of the lifecycle state machine.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        /// Status the task currently holds.
        from: TaskStatus,
        /// Status the caller asked for.
        to: TaskStatus,
    },

    /// The task is approved and closed to further modification.
    #[error("task {0} is approved and locked against modification")]
    TaskLocked(TaskId),

    /// Approval is blocked by incomplete subtasks.
    #[error("cannot approve task {task_id}: {remaining} subtask(s) incomplete")]
    IncompleteSubtasks {
        /// The task whose approval was requested.
        task_id: TaskId,
        /// Number of subtasks still incomplete.
        remaining: usize,
    },

    /// Deletion is blocked by attached subtasks.
    #[error("cannot delete task {task_id}: {count} subtask(s) attached")]
    HasSubtasks {
        /// The task whose deletion was requested.
        task_id: TaskId,
        /// Number of attached subtasks.
        count: usize,
    },

    /// The caller's identity or role does not permit the operation.
    #[error("caller {caller} is not permitted to {action}")]
    Forbidden {
        /// Identity of the rejected caller.
        caller: UserId,
        /// Short description of the refused operation.
        action: String,
    },
}

impl TaskDomainError {
    /// Builds a [`TaskDomainError::Forbidden`] for the given caller and action.
    pub fn forbidden(caller: UserId, action: impl Into<String>) -> Self {
        Self::Forbidden {
            caller,
            action: action.into(),
        }
    }
}

/// Error returned while parsing task statuses from their string form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing roles from their string form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

/// Error returned while parsing priorities from their string form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);
