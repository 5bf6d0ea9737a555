//! Periodic evaluation of open-task deadlines.

use crate::deadline::{
    domain::{DeadlineFinding, DeadlineKind, DeadlineWatermark},
    ports::{DeadlineFindingSink, WatermarkStore},
};
use crate::task::{
    domain::Task,
    ports::{TaskStore, TaskStoreError},
};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Tuning knobs for the deadline evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatorConfig {
    /// Interval between evaluation passes.
    pub tick: Duration,
    /// How far ahead of the due timestamp the approaching notice fires.
    pub approaching_window: TimeDelta,
    /// How long an overdue notice suppresses the next one. Re-noticing at
    /// all keeps a long-overdue task from going silently stale.
    pub overdue_renotice: TimeDelta,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(180),
            approaching_window: TimeDelta::hours(24),
            overdue_renotice: TimeDelta::hours(24),
        }
    }
}

/// Service-level errors for evaluator passes.
///
/// Only the open-task listing aborts a pass; per-task watermark and sink
/// failures are logged and that task is skipped until the next tick.
#[derive(Debug, Error)]
pub enum DeadlineEvaluatorError {
    /// The open-task listing failed; the pass was skipped.
    #[error(transparent)]
    Tasks(#[from] TaskStoreError),
}

/// Result type for evaluator operations.
pub type DeadlineEvaluatorResult<T> = Result<T, DeadlineEvaluatorError>;

/// Scans open tasks for approaching and overdue deadlines.
///
/// Each pass consults the per-task watermark before emitting: an
/// approaching notice fires once per due timestamp, an overdue notice
/// recurs at the configured re-notice interval. The watermark is persisted
/// before the finding is forwarded, so an interrupted pass can only drop a
/// finding until its window recurs, never duplicate one.
#[derive(Clone)]
pub struct DeadlineEvaluator<T, W, F, C>
where
    T: TaskStore,
    W: WatermarkStore,
    F: DeadlineFindingSink,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    watermarks: Arc<W>,
    findings: Arc<F>,
    clock: Arc<C>,
    config: EvaluatorConfig,
}

impl<T, W, F, C> DeadlineEvaluator<T, W, F, C>
where
    T: TaskStore,
    W: WatermarkStore,
    F: DeadlineFindingSink,
    C: Clock + Send + Sync,
{
    /// Creates a new evaluator over the given stores and sink.
    #[must_use]
    pub const fn new(
        tasks: Arc<T>,
        watermarks: Arc<W>,
        findings: Arc<F>,
        clock: Arc<C>,
        config: EvaluatorConfig,
    ) -> Self {
        Self {
            tasks,
            watermarks,
            findings,
            clock,
            config,
        }
    }

    /// Returns the configured tick interval.
    #[must_use]
    pub const fn tick(&self) -> Duration {
        self.config.tick
    }

    /// Runs one evaluation pass over all open tasks.
    ///
    /// Returns the number of findings forwarded.
    ///
    /// # Errors
    ///
    /// Returns [`DeadlineEvaluatorError::Tasks`] when the open-task listing
    /// fails. Failures on a single task are logged and skipped.
    pub async fn run_pass(&self) -> DeadlineEvaluatorResult<usize> {
        let open_tasks = self.tasks.list_open().await?;
        let now = self.clock.utc();

        let mut forwarded = 0_usize;
        for task in &open_tasks {
            match self.evaluate_task(task, now).await {
                Ok(true) => forwarded += 1,
                Ok(false) => {}
                Err(e) => {
                    warn!(err = %e, task_id = %task.id(), "deadline evaluation skipped task");
                }
            }
        }
        Ok(forwarded)
    }

    /// Evaluates one task; returns whether a finding was forwarded.
    async fn evaluate_task(
        &self,
        task: &Task,
        now: DateTime<Utc>,
    ) -> Result<bool, TaskEvaluationError> {
        let due_at = task.due_at();
        let mut watermark = self
            .watermarks
            .find(task.id())
            .await?
            .unwrap_or_else(|| DeadlineWatermark::new(task.id()));

        let kind = if due_at <= now {
            let suppressed = watermark
                .overdue_noticed_at()
                .is_some_and(|noticed| now - noticed < self.config.overdue_renotice);
            if suppressed {
                return Ok(false);
            }
            watermark.record_overdue(now);
            DeadlineKind::Overdue
        } else if due_at - now <= self.config.approaching_window {
            if watermark.covers_approaching(due_at) {
                return Ok(false);
            }
            watermark.record_approaching(due_at);
            DeadlineKind::Approaching
        } else {
            return Ok(false);
        };

        // Watermark first: a crash between the two drops the finding until
        // the window recurs instead of duplicating it.
        self.watermarks.save(&watermark).await?;
        let finding = DeadlineFinding {
            task_id: task.id(),
            title: task.title().to_owned(),
            assignee: task.assignee(),
            owner: task.owner(),
            due_at,
            kind,
            observed_at: now,
        };
        self.findings.forward(&finding).await?;
        debug!(task_id = %task.id(), kind = %kind, "deadline finding forwarded");
        Ok(true)
    }
}

/// Per-task evaluation failure, logged and skipped by the pass.
#[derive(Debug, Error)]
enum TaskEvaluationError {
    #[error(transparent)]
    Watermarks(#[from] crate::deadline::ports::WatermarkStoreError),
    #[error(transparent)]
    Sink(#[from] crate::deadline::ports::DeadlineFindingSinkError),
}
