//! Subtask checklist entity owned by a task.

use super::{SubtaskId, TaskDomainError, TaskId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Parameter object for reconstructing a persisted subtask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSubtaskData {
    /// Persisted subtask identifier.
    pub id: SubtaskId,
    /// Persisted parent task identifier.
    pub task_id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted completion flag.
    pub done: bool,
    /// Identity that completed the subtask, if completed.
    pub completed_by: Option<UserId>,
    /// Completion timestamp, if completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Checklist item attached to exactly one parent task.
///
/// Completion gates the parent's approval: a task cannot be approved while
/// any of its subtasks is incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    id: SubtaskId,
    task_id: TaskId,
    title: String,
    done: bool,
    completed_by: Option<UserId>,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl Subtask {
    /// Creates a new incomplete subtask under the given parent.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn new(
        task_id: TaskId,
        title: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let text = title.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }

        Ok(Self {
            id: SubtaskId::new(),
            task_id,
            title: trimmed.to_owned(),
            done: false,
            completed_by: None,
            completed_at: None,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a subtask from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSubtaskData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            title: data.title,
            done: data.done,
            completed_by: data.completed_by,
            completed_at: data.completed_at,
            created_at: data.created_at,
        }
    }

    /// Returns the subtask identifier.
    #[must_use]
    pub const fn id(&self) -> SubtaskId {
        self.id
    }

    /// Returns the parent task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the subtask title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the completion flag.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Returns the identity that completed the subtask, if completed.
    #[must_use]
    pub const fn completed_by(&self) -> Option<UserId> {
        self.completed_by
    }

    /// Returns the completion timestamp, if completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Marks the subtask complete on behalf of `by`.
    ///
    /// Completion is idempotent: completing an already-complete subtask
    /// changes nothing and keeps the original completer and timestamp. The
    /// return value tells the caller whether anything changed, so repeat
    /// calls can skip the store write.
    #[must_use]
    pub fn complete(&mut self, by: UserId, clock: &impl Clock) -> bool {
        if self.done {
            return false;
        }
        self.done = true;
        self.completed_by = Some(by);
        self.completed_at = Some(clock.utc());
        true
    }
}
