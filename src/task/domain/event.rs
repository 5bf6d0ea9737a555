//! Lifecycle events emitted by the task services.

use super::{TaskId, UserId, task::TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain event describing a task lifecycle change.
///
/// Events are handed to the event sink after the corresponding store write
/// commits; the notification dispatcher turns them into per-user records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskEvent {
    /// A task was created and assigned.
    Assigned {
        /// Identifier of the created task.
        task_id: TaskId,
        /// Title of the created task.
        title: String,
        /// Identity of the creating caller.
        owner: UserId,
        /// Identity the work is assigned to.
        assignee: UserId,
        /// Deadline for the work.
        due_at: DateTime<Utc>,
        /// Instant the task was created.
        occurred_at: DateTime<Utc>,
    },
    /// A task moved along a lifecycle edge.
    StatusChanged {
        /// Identifier of the task.
        task_id: TaskId,
        /// Title of the task.
        title: String,
        /// Identity the work is assigned to.
        assignee: UserId,
        /// Status before the transition.
        from: TaskStatus,
        /// Status after the transition.
        to: TaskStatus,
        /// Identity of the caller that took the edge.
        actor: UserId,
        /// Rejection reason, present on `rejected` transitions when given.
        reason: Option<String>,
        /// Instant the transition was recorded.
        occurred_at: DateTime<Utc>,
    },
}

impl TaskEvent {
    /// Returns the identifier of the task the event concerns.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        match self {
            Self::Assigned { task_id, .. } | Self::StatusChanged { task_id, .. } => *task_id,
        }
    }
}
