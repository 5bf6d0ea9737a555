//! Findings produced by a deadline evaluation pass.

use crate::task::domain::{TaskId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a deadline finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineKind {
    /// The due timestamp lies within the configured approaching window.
    Approaching,
    /// The due timestamp has passed and the task is still open.
    Overdue,
}

impl DeadlineKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approaching => "approaching",
            Self::Overdue => "overdue",
        }
    }
}

impl fmt::Display for DeadlineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One evaluator observation about an open task's deadline.
///
/// Findings are forwarded to the finding sink at most once per watermark
/// window; the notification dispatcher turns them into per-user records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineFinding {
    /// The observed task.
    pub task_id: TaskId,
    /// Title of the observed task, carried for human-readable messages.
    pub title: String,
    /// Identity the task is assigned to.
    pub assignee: UserId,
    /// Identity of the task's owner.
    pub owner: UserId,
    /// The task's due timestamp.
    pub due_at: DateTime<Utc>,
    /// Whether the deadline is approaching or already passed.
    pub kind: DeadlineKind,
    /// Clock reading at the moment of observation.
    pub observed_at: DateTime<Utc>,
}
