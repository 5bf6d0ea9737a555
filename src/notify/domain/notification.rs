//! Notification records delivered to per-user inboxes.

use crate::notify::domain::error::{NotifyDomainError, ParseNotificationKindError};
use crate::task::domain::{TaskId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a notification record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(Uuid);

impl NotificationId {
    /// Creates a new random notification identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a notification identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for NotificationId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category of a notification, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// The recipient was assigned a newly created task.
    TaskAssigned,
    /// A task the recipient worked on was approved.
    TaskApproved,
    /// A task the recipient submitted was rejected.
    TaskRejected,
    /// A task's due timestamp falls within the approaching window.
    DeadlineApproaching,
    /// A task's due timestamp has passed.
    DeadlineOverdue,
}

impl NotificationKind {
    /// Returns the canonical string form of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskAssigned => "task_assigned",
            Self::TaskApproved => "task_approved",
            Self::TaskRejected => "task_rejected",
            Self::DeadlineApproaching => "deadline_approaching",
            Self::DeadlineOverdue => "deadline_overdue",
        }
    }
}

impl TryFrom<&str> for NotificationKind {
    type Error = ParseNotificationKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "task_assigned" => Ok(Self::TaskAssigned),
            "task_approved" => Ok(Self::TaskApproved),
            "task_rejected" => Ok(Self::TaskRejected),
            "deadline_approaching" => Ok(Self::DeadlineApproaching),
            "deadline_overdue" => Ok(Self::DeadlineOverdue),
            other => Err(ParseNotificationKindError(other.to_owned())),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inbox record created by the dispatcher and owned by its recipient.
///
/// Only the recipient mutates a notification, and only by marking it read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    recipient: UserId,
    kind: NotificationKind,
    task_id: TaskId,
    message: String,
    created_at: DateTime<Utc>,
    read: bool,
}

impl Notification {
    /// Creates an unread notification stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyDomainError::EmptyMessage`] when the message is
    /// empty or whitespace-only.
    pub fn new(
        recipient: UserId,
        kind: NotificationKind,
        task_id: TaskId,
        message: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, NotifyDomainError> {
        let text = message.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(NotifyDomainError::EmptyMessage);
        }
        Ok(Self {
            id: NotificationId::new(),
            recipient,
            kind,
            task_id,
            message: trimmed.to_owned(),
            created_at: clock.utc(),
            read: false,
        })
    }

    /// Returns the notification identifier.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the recipient identity.
    #[must_use]
    pub const fn recipient(&self) -> UserId {
        self.recipient
    }

    /// Returns the notification kind.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Returns the task the notification refers to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns when the notification was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether the recipient has read the notification.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.read
    }

    /// Marks the notification read. Returns `false` when it already was.
    pub const fn mark_read(&mut self) -> bool {
        if self.read {
            return false;
        }
        self.read = true;
        true
    }
}
