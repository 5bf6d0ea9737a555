//! Service layer for append-only work logging.

use crate::task::{
    domain::{
        Actor, TaskDomainError, TaskId, WorkLog, WorkLogCorrection, WorkLogEntry, WorkLogId,
    },
    ports::{TaskStore, TaskStoreError, WorkLogStore, WorkLogStoreError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for logging work against a task.
#[derive(Debug, Clone, PartialEq)]
pub struct LogWorkRequest {
    task_id: TaskId,
    hours: f64,
    description: String,
    logged_on: NaiveDate,
}

impl LogWorkRequest {
    /// Creates a request for the given task, effort, and work date.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        hours: f64,
        description: impl Into<String>,
        logged_on: NaiveDate,
    ) -> Self {
        Self {
            task_id,
            hours,
            description: description.into(),
            logged_on,
        }
    }
}

/// Request payload for an administrative work log correction.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectWorkLogRequest {
    work_log_id: WorkLogId,
    note: String,
    corrected_hours: Option<f64>,
    corrected_description: Option<String>,
}

impl CorrectWorkLogRequest {
    /// Creates a request carrying the mandatory explanatory note.
    #[must_use]
    pub fn new(work_log_id: WorkLogId, note: impl Into<String>) -> Self {
        Self {
            work_log_id,
            note: note.into(),
            corrected_hours: None,
            corrected_description: None,
        }
    }

    /// Supplies an amended hours value.
    #[must_use]
    pub const fn with_hours(mut self, hours: f64) -> Self {
        self.corrected_hours = Some(hours);
        self
    }

    /// Supplies an amended description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.corrected_description = Some(description.into());
        self
    }
}

/// Service-level errors for work log operations.
#[derive(Debug, Error)]
pub enum WorkLogServiceError {
    /// Domain rule violation.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Work log store operation failed.
    #[error(transparent)]
    WorkLogs(#[from] WorkLogStoreError),
    /// Task store operation failed.
    #[error(transparent)]
    Tasks(#[from] TaskStoreError),
}

/// Result type for work log service operations.
pub type WorkLogServiceResult<T> = Result<T, WorkLogServiceError>;

/// Work log orchestration service.
#[derive(Clone)]
pub struct WorkLogService<W, S, C>
where
    W: WorkLogStore,
    S: TaskStore,
    C: Clock + Send + Sync,
{
    work_logs: Arc<W>,
    tasks: Arc<S>,
    clock: Arc<C>,
}

impl<W, S, C> WorkLogService<W, S, C>
where
    W: WorkLogStore,
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a new work log service.
    #[must_use]
    pub const fn new(work_logs: Arc<W>, tasks: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            work_logs,
            tasks,
            clock,
        }
    }

    /// Appends a work log entry authored by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::TaskNotFound`] when the task is absent,
    /// [`TaskDomainError::Forbidden`] unless the caller is the task's
    /// assignee or an admin, and [`TaskDomainError::InvalidHours`] or
    /// [`TaskDomainError::EmptyWorkDescription`] on invalid input.
    pub async fn log_work(
        &self,
        request: LogWorkRequest,
        actor: &Actor,
    ) -> WorkLogServiceResult<WorkLog> {
        let task = self
            .tasks
            .find_by_id(request.task_id)
            .await?
            .ok_or(TaskStoreError::TaskNotFound(request.task_id))?;
        if actor.id() != task.assignee() && !actor.is_admin() {
            return Err(TaskDomainError::forbidden(
                actor.id(),
                "log work against a task assigned to another user",
            )
            .into());
        }

        let entry = WorkLog::new(
            request.task_id,
            actor.id(),
            request.hours,
            request.description,
            request.logged_on,
            &*self.clock,
        )?;
        self.work_logs.append(&entry).await?;
        Ok(entry)
    }

    /// Records an administrative correction against a work log entry.
    ///
    /// The original entry is never touched; at most one correction may
    /// exist, so a second attempt fails.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::Forbidden`] for non-admin callers,
    /// [`WorkLogStoreError::WorkLogNotFound`] when the entry is absent,
    /// [`TaskDomainError::WorkLogAlreadyCorrected`] when a correction
    /// already exists, and [`TaskDomainError::EmptyNote`] or
    /// [`TaskDomainError::InvalidHours`] on invalid input.
    pub async fn correct_work_log(
        &self,
        request: CorrectWorkLogRequest,
        actor: &Actor,
    ) -> WorkLogServiceResult<WorkLogCorrection> {
        if !actor.is_admin() {
            return Err(TaskDomainError::forbidden(actor.id(), "correct work logs").into());
        }

        let correction = WorkLogCorrection::new(
            request.work_log_id,
            actor.id(),
            request.note,
            request.corrected_hours,
            request.corrected_description,
            &*self.clock,
        )?;
        match self.work_logs.attach_correction(&correction).await {
            Ok(()) => Ok(correction),
            Err(WorkLogStoreError::CorrectionExists(id)) => {
                Err(TaskDomainError::WorkLogAlreadyCorrected(id).into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Returns the work log entries for a task, newest first, each paired
    /// with its correction when one exists.
    ///
    /// Deliberately skips the task-existence check: entries survive task
    /// deletion as audit artifacts.
    ///
    /// # Errors
    ///
    /// Returns [`WorkLogServiceError::WorkLogs`] when the listing fails.
    pub async fn list_for_task(&self, task_id: TaskId) -> WorkLogServiceResult<Vec<WorkLogEntry>> {
        Ok(self.work_logs.list_for_task(task_id).await?)
    }
}
