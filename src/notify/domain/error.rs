//! Domain errors for the notification context.

use crate::notify::domain::notification::NotificationId;
use crate::task::domain::UserId;
use thiserror::Error;

/// Validation and ownership failures raised by the notification domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyDomainError {
    /// The notification message was empty or whitespace-only.
    #[error("notification message must not be empty")]
    EmptyMessage,
    /// The supplied text is not a plausible email address.
    #[error("invalid email address: {0:?}")]
    InvalidEmailAddress(String),
    /// A caller tried to act on a notification addressed to someone else.
    #[error("user {caller} does not own notification {notification_id}")]
    ForeignNotification {
        /// The caller whose access was refused.
        caller: UserId,
        /// The notification that belongs to another recipient.
        notification_id: NotificationId,
    },
}

/// Error returned when parsing a [`NotificationKind`] from a string.
///
/// [`NotificationKind`]: crate::notify::domain::NotificationKind
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown notification kind: {0:?}")]
pub struct ParseNotificationKindError(pub String);
