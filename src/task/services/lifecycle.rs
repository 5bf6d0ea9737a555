//! Service layer enforcing the task lifecycle rules.

use crate::task::{
    domain::{
        Actor, NewTask, Priority, Subtask, SubtaskId, Task, TaskDomainError, TaskEvent, TaskId,
        TaskStatus, UserId,
    },
    ports::{TaskEventSink, TaskStore, TaskStoreError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    assignee: UserId,
    priority: Priority,
    due_at: DateTime<Utc>,
}

impl CreateTaskRequest {
    /// Creates a request with required fields; priority defaults to medium.
    #[must_use]
    pub fn new(title: impl Into<String>, assignee: UserId, due_at: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            assignee,
            priority: Priority::Medium,
            due_at,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the task priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Request payload for moving a task along a lifecycle edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTaskRequest {
    task_id: TaskId,
    target: TaskStatus,
    reason: Option<String>,
}

impl TransitionTaskRequest {
    /// Creates a request for the given task and target status.
    #[must_use]
    pub const fn new(task_id: TaskId, target: TaskStatus) -> Self {
        Self {
            task_id,
            target,
            reason: None,
        }
    }

    /// Attaches a reason, carried into the decision record and the emitted
    /// event on rejection.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain rule violation.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task store operation failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// All task and subtask mutations flow through here. Every write follows
/// load, mutate, version-checked store; the matching lifecycle event is
/// published only after the write commits, and a delivery failure is logged
/// rather than surfaced, because the stored task is the authoritative
/// outcome.
#[derive(Clone)]
pub struct TaskLifecycleService<S, E, C>
where
    S: TaskStore,
    E: TaskEventSink,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    events: Arc<E>,
    clock: Arc<C>,
}

impl<S, E, C> TaskLifecycleService<S, E, C>
where
    S: TaskStore,
    E: TaskEventSink,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(store: Arc<S>, events: Arc<E>, clock: Arc<C>) -> Self {
        Self {
            store,
            events,
            clock,
        }
    }

    /// Creates a new pending task and emits the assignment event.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::Forbidden`] unless the caller's role may
    /// create tasks, [`TaskDomainError::EmptyTitle`] or
    /// [`TaskDomainError::DueNotInFuture`] on invalid input, and store
    /// errors on persistence failure.
    pub async fn create_task(
        &self,
        request: CreateTaskRequest,
        actor: &Actor,
    ) -> TaskLifecycleResult<Task> {
        if !actor.role().can_create_tasks() {
            return Err(TaskDomainError::forbidden(actor.id(), "create and assign tasks").into());
        }

        let task = Task::new(
            NewTask {
                title: request.title,
                description: request.description,
                owner: actor.id(),
                assignee: request.assignee,
                priority: request.priority,
                due_at: request.due_at,
            },
            &*self.clock,
        )?;
        self.store.store(&task).await?;

        self.publish(TaskEvent::Assigned {
            task_id: task.id(),
            title: task.title().to_owned(),
            owner: task.owner(),
            assignee: task.assignee(),
            due_at: task.due_at(),
            occurred_at: task.created_at(),
        })
        .await;
        Ok(task)
    }

    /// Moves a task along a lifecycle edge and emits the status event.
    ///
    /// The transition table decides both edge legality and the caller
    /// requirement; the `approved` edge additionally re-checks that every
    /// subtask is complete.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::TaskNotFound`] when the task is absent,
    /// [`TaskDomainError::InvalidTransition`], [`TaskDomainError::Forbidden`]
    /// or [`TaskDomainError::IncompleteSubtasks`] when a rule refuses the
    /// edge, and [`TaskStoreError::Conflict`] when a concurrent writer
    /// committed first.
    pub async fn transition(
        &self,
        request: TransitionTaskRequest,
        actor: &Actor,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.require_task(request.task_id).await?;
        let previous = task.status();

        let gate = previous.transition_gate(request.target).ok_or(
            TaskDomainError::InvalidTransition {
                from: previous,
                to: request.target,
            },
        )?;
        gate.authorize(actor, task.assignee())?;

        if request.target == TaskStatus::Approved {
            let remaining = self
                .store
                .list_subtasks(task.id())
                .await?
                .iter()
                .filter(|subtask| !subtask.is_done())
                .count();
            if remaining > 0 {
                return Err(TaskDomainError::IncompleteSubtasks {
                    task_id: task.id(),
                    remaining,
                }
                .into());
            }
        }

        task.transition_to(request.target, actor, request.reason.clone(), &*self.clock)?;
        self.store.update(&task).await?;

        self.publish(TaskEvent::StatusChanged {
            task_id: task.id(),
            title: task.title().to_owned(),
            assignee: task.assignee(),
            from: previous,
            to: request.target,
            actor: actor.id(),
            reason: request.reason,
            occurred_at: task.updated_at(),
        })
        .await;
        Ok(task)
    }

    /// Adds a subtask to a task's checklist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::TaskNotFound`] when the task is absent,
    /// [`TaskDomainError::Forbidden`] unless the caller is the task's owner,
    /// its assignee, or an admin, [`TaskDomainError::TaskLocked`] when the
    /// task is approved, and [`TaskDomainError::EmptyTitle`] on a blank
    /// title.
    pub async fn add_subtask(
        &self,
        task_id: TaskId,
        title: impl Into<String> + Send,
        actor: &Actor,
    ) -> TaskLifecycleResult<Subtask> {
        let mut task = self.require_task(task_id).await?;
        let may_modify =
            actor.id() == task.owner() || actor.id() == task.assignee() || actor.is_admin();
        if !may_modify {
            return Err(
                TaskDomainError::forbidden(actor.id(), "modify this task's checklist").into(),
            );
        }

        let subtask = Subtask::new(task.id(), title, &*self.clock)?;
        task.attach_subtask(subtask.id(), &*self.clock)?;
        self.store.insert_subtask(&task, &subtask).await?;
        Ok(subtask)
    }

    /// Marks a subtask complete; repeat completions are no-ops.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::SubtaskNotFound`] or
    /// [`TaskStoreError::TaskNotFound`] when a record is absent,
    /// [`TaskDomainError::Forbidden`] unless the caller is the parent's
    /// assignee or an admin, and [`TaskDomainError::TaskLocked`] when the
    /// parent is approved.
    pub async fn complete_subtask(
        &self,
        subtask_id: SubtaskId,
        actor: &Actor,
    ) -> TaskLifecycleResult<Subtask> {
        let mut subtask = self
            .store
            .find_subtask(subtask_id)
            .await?
            .ok_or(TaskStoreError::SubtaskNotFound(subtask_id))?;
        let parent = self.require_task(subtask.task_id()).await?;

        if actor.id() != parent.assignee() && !actor.is_admin() {
            return Err(TaskDomainError::forbidden(
                actor.id(),
                "complete subtasks of a task assigned to another user",
            )
            .into());
        }
        if parent.status().is_terminal() {
            return Err(TaskDomainError::TaskLocked(parent.id()).into());
        }

        if subtask.complete(actor.id(), &*self.clock) {
            self.store.update_subtask(&subtask).await?;
        }
        Ok(subtask)
    }

    /// Deletes a task, cascading its subtasks when forced.
    ///
    /// Work logs referencing the task are left in place as audit artifacts.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::TaskNotFound`] when the task is absent,
    /// [`TaskDomainError::Forbidden`] unless the caller is the task's owner
    /// or an admin, and [`TaskDomainError::HasSubtasks`] when subtasks are
    /// attached and `force` is false.
    pub async fn delete_task(
        &self,
        task_id: TaskId,
        force: bool,
        actor: &Actor,
    ) -> TaskLifecycleResult<()> {
        let task = self.require_task(task_id).await?;
        if actor.id() != task.owner() && !actor.is_admin() {
            return Err(TaskDomainError::forbidden(actor.id(), "delete this task").into());
        }

        let count = task.subtask_ids().len();
        if count > 0 && !force {
            return Err(TaskDomainError::HasSubtasks { task_id, count }.into());
        }

        self.store.delete_task(task_id).await?;
        Ok(())
    }

    /// Appends an administrative audit note, the one mutation allowed on an
    /// approved task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::TaskNotFound`] when the task is absent,
    /// [`TaskDomainError::Forbidden`] for non-admin callers, and
    /// [`TaskDomainError::EmptyNote`] on a blank note.
    pub async fn add_audit_note(
        &self,
        task_id: TaskId,
        note: impl Into<String> + Send,
        actor: &Actor,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.require_task(task_id).await?;
        task.add_audit_note(actor, note, &*self.clock)?;
        self.store.update(&task).await?;
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the lookup fails.
    pub async fn find_task(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.store.find_by_id(task_id).await?)
    }

    async fn require_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.store
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| TaskStoreError::TaskNotFound(task_id).into())
    }

    /// Publishes an event, logging delivery failures instead of surfacing
    /// them: the committed store write is the authoritative outcome.
    async fn publish(&self, event: TaskEvent) {
        if let Err(e) = self.events.publish(&event).await {
            warn!(err = %e, task_id = %event.task_id(), "lifecycle event delivery failed");
        }
    }
}
