//! Per-task notice watermarks making evaluation idempotent.

use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted record of the deadline notices already delivered for one task.
///
/// The watermark is explicit state passed through every evaluator pass: a
/// pass reads it, decides, and writes it back before forwarding a finding.
/// Re-running a pass against unchanged watermarks therefore produces no
/// duplicate findings, including across process restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineWatermark {
    task_id: TaskId,
    approaching_for: Option<DateTime<Utc>>,
    overdue_noticed_at: Option<DateTime<Utc>>,
}

impl DeadlineWatermark {
    /// Creates an empty watermark for a task with no notices delivered.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            approaching_for: None,
            overdue_noticed_at: None,
        }
    }

    /// Returns the task this watermark belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the due timestamp the approaching notice covered, if one was
    /// delivered.
    #[must_use]
    pub const fn approaching_for(&self) -> Option<DateTime<Utc>> {
        self.approaching_for
    }

    /// Returns the instant of the latest overdue notice, if any.
    #[must_use]
    pub const fn overdue_noticed_at(&self) -> Option<DateTime<Utc>> {
        self.overdue_noticed_at
    }

    /// Whether an approaching notice has been delivered for the given due
    /// timestamp.
    #[must_use]
    pub fn covers_approaching(&self, due_at: DateTime<Utc>) -> bool {
        self.approaching_for == Some(due_at)
    }

    /// Records that an approaching notice was delivered for the given due
    /// timestamp.
    pub const fn record_approaching(&mut self, due_at: DateTime<Utc>) {
        self.approaching_for = Some(due_at);
    }

    /// Records that an overdue notice was delivered at the given instant.
    pub const fn record_overdue(&mut self, at: DateTime<Utc>) {
        self.overdue_noticed_at = Some(at);
    }
}
