//! Task aggregate root and the lifecycle state machine.

use super::{
    Actor, ParsePriorityError, ParseTaskStatusError, SubtaskId, TaskDomainError, TaskId, UserId,
};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been created but work has not started.
    Pending,
    /// Task is being worked by its assignee.
    InProgress,
    /// Task has been handed in and awaits an approval decision.
    Submitted,
    /// Task has been accepted; the record is closed.
    Approved,
    /// Task has been sent back; the assignee may resume work.
    Rejected,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Whether the status closes the task for good.
    ///
    /// Only `approved` is terminal; a rejected task may be resubmitted.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Whether a task in this status still faces its deadline.
    ///
    /// Approved and rejected tasks are excluded from deadline evaluation.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress | Self::Submitted)
    }

    /// Returns the caller requirement for the edge from `self` to `target`,
    /// or `None` when the edge is not part of the state machine.
    ///
    /// This table is the single authority for both edge legality and the
    /// role check attached to each edge.
    #[must_use]
    pub const fn transition_gate(self, target: Self) -> Option<TransitionGate> {
        match (self, target) {
            (Self::Pending | Self::Rejected, Self::InProgress)
            | (Self::InProgress, Self::Submitted) => Some(TransitionGate::Assignee),
            (Self::Submitted, Self::Approved | Self::Rejected) => {
                Some(TransitionGate::Approver)
            }
            _ => None,
        }
    }

    /// Whether the edge from `self` to `target` is legal for any caller.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        self.transition_gate(target).is_some()
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "submitted" => Ok(Self::Submitted),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller requirement attached to a lifecycle edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionGate {
    /// Only the task's assignee may take the edge.
    Assignee,
    /// Only a caller whose role decides approvals may take the edge.
    Approver,
}

impl TransitionGate {
    /// Checks the caller against this gate.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::Forbidden`] when the caller does not meet
    /// the requirement.
    pub fn authorize(self, actor: &Actor, assignee: UserId) -> Result<(), TaskDomainError> {
        let permitted = match self {
            Self::Assignee => actor.id() == assignee,
            Self::Approver => actor.role().can_decide_approvals(),
        };
        if permitted {
            Ok(())
        } else {
            Err(TaskDomainError::forbidden(actor.id(), self.description()))
        }
    }

    const fn description(self) -> &'static str {
        match self {
            Self::Assignee => "advance a task assigned to another user",
            Self::Approver => "decide task approval",
        }
    }
}

/// Urgency attached to a task at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Default urgency.
    Medium,
    /// Should be picked up soon.
    High,
    /// Drop everything.
    Urgent,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of the latest approval decision on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalRecord {
    /// Identity of the deciding caller.
    pub decided_by: UserId,
    /// Instant the decision was recorded.
    pub decided_at: DateTime<Utc>,
    /// Reason supplied with a rejection, if any.
    pub rejection_reason: Option<String>,
}

/// Administrative note appended to a task's audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditNote {
    /// Identity of the note's author.
    pub author: UserId,
    /// Note text.
    pub body: String,
    /// Instant the note was recorded.
    pub noted_at: DateTime<Utc>,
}

/// Parameter object describing a task to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title.
    pub title: String,
    /// Free-form task description.
    pub description: String,
    /// Identity of the creating caller.
    pub owner: UserId,
    /// Identity of the user the work is assigned to.
    pub assignee: UserId,
    /// Urgency of the task.
    pub priority: Priority,
    /// Deadline for the work.
    pub due_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted owner identity.
    pub owner: UserId,
    /// Persisted assignee identity.
    pub assignee: UserId,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted due timestamp.
    pub due_at: DateTime<Utc>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted ordered subtask identifiers.
    pub subtask_ids: Vec<SubtaskId>,
    /// Persisted latest approval decision, if any.
    pub approval: Option<ApprovalRecord>,
    /// Persisted audit notes, oldest first.
    pub audit_notes: Vec<AuditNote>,
    /// Persisted optimistic-concurrency version.
    pub version: u64,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    owner: UserId,
    assignee: UserId,
    priority: Priority,
    status: TaskStatus,
    due_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    subtask_ids: Vec<SubtaskId>,
    approval: Option<ApprovalRecord>,
    audit_notes: Vec<AuditNote>,
    version: u64,
}

impl Task {
    /// Creates a new pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank and
    /// [`TaskDomainError::DueNotInFuture`] when the due timestamp is not
    /// strictly after the current clock reading.
    pub fn new(spec: NewTask, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let title = spec.title.trim().to_owned();
        if title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let timestamp = clock.utc();
        if spec.due_at <= timestamp {
            return Err(TaskDomainError::DueNotInFuture { due: spec.due_at });
        }

        Ok(Self {
            id: TaskId::new(),
            title,
            description: spec.description,
            owner: spec.owner,
            assignee: spec.assignee,
            priority: spec.priority,
            status: TaskStatus::Pending,
            due_at: spec.due_at,
            created_at: timestamp,
            updated_at: timestamp,
            subtask_ids: Vec::new(),
            approval: None,
            audit_notes: Vec::new(),
            version: 0,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            owner: data.owner,
            assignee: data.assignee,
            priority: data.priority,
            status: data.status,
            due_at: data.due_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
            subtask_ids: data.subtask_ids,
            approval: data.approval,
            audit_notes: data.audit_notes,
            version: data.version,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the identity of the creating caller.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the identity the work is assigned to.
    #[must_use]
    pub const fn assignee(&self) -> UserId {
        self.assignee
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the due timestamp.
    #[must_use]
    pub const fn due_at(&self) -> DateTime<Utc> {
        self.due_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the ordered identifiers of attached subtasks.
    #[must_use]
    pub fn subtask_ids(&self) -> &[SubtaskId] {
        &self.subtask_ids
    }

    /// Returns the latest approval decision, if any.
    #[must_use]
    pub const fn approval(&self) -> Option<&ApprovalRecord> {
        self.approval.as_ref()
    }

    /// Returns the audit notes, oldest first.
    #[must_use]
    pub fn audit_notes(&self) -> &[AuditNote] {
        &self.audit_notes
    }

    /// Returns the optimistic-concurrency version.
    ///
    /// Every mutation increments the version by exactly one; the store
    /// rejects an update whose version does not directly follow the stored
    /// one.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Moves the task along a lifecycle edge on behalf of `actor`.
    ///
    /// An approval or rejection records the decision (with the optional
    /// rejection reason); resuming work from `rejected` clears the previous
    /// decision record.
    ///
    /// The caller is responsible for the subtask-completeness check that
    /// guards the `approved` edge; this method only validates the edge and
    /// its gate.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when the edge is not in
    /// the state machine and [`TaskDomainError::Forbidden`] when the caller
    /// fails the edge's gate.
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        actor: &Actor,
        reason: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let Some(gate) = self.status.transition_gate(target) else {
            return Err(TaskDomainError::InvalidTransition {
                from: self.status,
                to: target,
            });
        };
        gate.authorize(actor, self.assignee)?;

        self.status = target;
        let stamped_at = self.touch(clock);
        self.approval = match target {
            TaskStatus::Approved | TaskStatus::Rejected => Some(ApprovalRecord {
                decided_by: actor.id(),
                decided_at: stamped_at,
                rejection_reason: reason,
            }),
            _ => None,
        };
        Ok(())
    }

    /// Attaches a subtask identifier to the ordered sequence.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskLocked`] when the task is approved.
    pub fn attach_subtask(
        &mut self,
        subtask_id: SubtaskId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if self.status.is_terminal() {
            return Err(TaskDomainError::TaskLocked(self.id));
        }
        self.subtask_ids.push(subtask_id);
        self.touch(clock);
        Ok(())
    }

    /// Appends an administrative audit note.
    ///
    /// This is the one mutation allowed on an approved task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::Forbidden`] for non-admin callers and
    /// [`TaskDomainError::EmptyNote`] when the note is blank.
    pub fn add_audit_note(
        &mut self,
        actor: &Actor,
        body: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !actor.is_admin() {
            return Err(TaskDomainError::forbidden(actor.id(), "add audit notes"));
        }
        let text = body.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyNote);
        }
        let noted_at = self.touch(clock);
        self.audit_notes.push(AuditNote {
            author: actor.id(),
            body: trimmed.to_owned(),
            noted_at,
        });
        Ok(())
    }

    /// Advances `updated_at` and the version counter.
    ///
    /// The timestamp moves strictly forward even when the clock reads the
    /// same instant twice, so `updated_at` orders mutations unambiguously.
    fn touch(&mut self, clock: &impl Clock) -> DateTime<Utc> {
        let floor = self.updated_at + TimeDelta::microseconds(1);
        self.updated_at = clock.utc().max(floor);
        self.version += 1;
        self.updated_at
    }
}
