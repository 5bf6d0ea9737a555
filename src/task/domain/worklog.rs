//! Append-only work log entries and their administrative corrections.

use super::{TaskDomainError, TaskId, UserId, WorkLogId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Checks an hours-spent value without arithmetic on it.
fn validate_hours(hours: f64) -> Result<(), TaskDomainError> {
    if hours.is_finite() && hours > 0.0 {
        Ok(())
    } else {
        Err(TaskDomainError::InvalidHours { hours })
    }
}

/// Immutable record of hours spent against a task.
///
/// A work log references its task but is not owned by it: the entry survives
/// task deletion as an audit artifact. Once created it is never mutated; an
/// administrative [`WorkLogCorrection`] soft-invalidates it instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkLog {
    id: WorkLogId,
    task_id: TaskId,
    author: UserId,
    hours: f64,
    description: String,
    logged_on: NaiveDate,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted work log.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedWorkLogData {
    /// Persisted work log identifier.
    pub id: WorkLogId,
    /// Persisted task reference.
    pub task_id: TaskId,
    /// Persisted author identity.
    pub author: UserId,
    /// Persisted hours spent.
    pub hours: f64,
    /// Persisted description.
    pub description: String,
    /// Persisted work date.
    pub logged_on: NaiveDate,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl WorkLog {
    /// Creates a new work log entry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidHours`] unless hours is a positive
    /// finite number and [`TaskDomainError::EmptyWorkDescription`] when the
    /// description is blank.
    pub fn new(
        task_id: TaskId,
        author: UserId,
        hours: f64,
        description: impl Into<String>,
        logged_on: NaiveDate,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        validate_hours(hours)?;
        let text = description.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyWorkDescription);
        }

        Ok(Self {
            id: WorkLogId::new(),
            task_id,
            author,
            hours,
            description: trimmed.to_owned(),
            logged_on,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a work log from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedWorkLogData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            author: data.author,
            hours: data.hours,
            description: data.description,
            logged_on: data.logged_on,
            created_at: data.created_at,
        }
    }

    /// Returns the work log identifier.
    #[must_use]
    pub const fn id(&self) -> WorkLogId {
        self.id
    }

    /// Returns the referenced task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the author identity.
    #[must_use]
    pub const fn author(&self) -> UserId {
        self.author
    }

    /// Returns the hours spent.
    #[must_use]
    pub const fn hours(&self) -> f64 {
        self.hours
    }

    /// Returns the work description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the date the work was done.
    #[must_use]
    pub const fn logged_on(&self) -> NaiveDate {
        self.logged_on
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Administrative correction soft-invalidating a work log entry.
///
/// At most one correction may exist per work log. The original entry stays
/// untouched; readers consult the correction for the amended values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkLogCorrection {
    work_log_id: WorkLogId,
    corrected_by: UserId,
    corrected_hours: Option<f64>,
    corrected_description: Option<String>,
    note: String,
    corrected_at: DateTime<Utc>,
}

impl WorkLogCorrection {
    /// Creates a correction for the given work log.
    ///
    /// Either or both of `corrected_hours` and `corrected_description` may be
    /// supplied; the note explaining the correction is mandatory.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyNote`] when the note is blank and
    /// [`TaskDomainError::InvalidHours`] when a corrected hours value is not
    /// a positive finite number.
    pub fn new(
        work_log_id: WorkLogId,
        corrected_by: UserId,
        note: impl Into<String>,
        corrected_hours: Option<f64>,
        corrected_description: Option<String>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let text = note.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyNote);
        }
        if let Some(hours) = corrected_hours {
            validate_hours(hours)?;
        }

        Ok(Self {
            work_log_id,
            corrected_by,
            corrected_hours,
            corrected_description,
            note: trimmed.to_owned(),
            corrected_at: clock.utc(),
        })
    }

    /// Returns the corrected work log identifier.
    #[must_use]
    pub const fn work_log_id(&self) -> WorkLogId {
        self.work_log_id
    }

    /// Returns the correcting admin's identity.
    #[must_use]
    pub const fn corrected_by(&self) -> UserId {
        self.corrected_by
    }

    /// Returns the amended hours value, if supplied.
    #[must_use]
    pub const fn corrected_hours(&self) -> Option<f64> {
        self.corrected_hours
    }

    /// Returns the amended description, if supplied.
    #[must_use]
    pub fn corrected_description(&self) -> Option<&str> {
        self.corrected_description.as_deref()
    }

    /// Returns the explanatory note.
    #[must_use]
    pub fn note(&self) -> &str {
        &self.note
    }

    /// Returns the correction timestamp.
    #[must_use]
    pub const fn corrected_at(&self) -> DateTime<Utc> {
        self.corrected_at
    }
}

/// Work log entry paired with its correction, if one exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkLogEntry {
    /// The original, immutable work log.
    pub log: WorkLog,
    /// The administrative correction, when one has been recorded.
    pub correction: Option<WorkLogCorrection>,
}
