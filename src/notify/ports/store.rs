//! Store port for per-user notification inboxes.

use crate::notify::domain::{Notification, NotificationId};
use crate::task::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification store operations.
pub type NotificationStoreResult<T> = Result<T, NotificationStoreError>;

/// Persistence contract for notification records.
///
/// Records are written once by the dispatcher; the only mutation afterwards
/// is the recipient flipping the read flag.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Stores a new notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationStoreError::DuplicateNotification`] when the
    /// identifier already exists.
    async fn store(&self, notification: &Notification) -> NotificationStoreResult<()>;

    /// Finds a notification by identifier.
    ///
    /// Returns `None` when the notification does not exist.
    async fn find_by_id(&self, id: NotificationId) -> NotificationStoreResult<Option<Notification>>;

    /// Returns a recipient's notifications, newest first.
    ///
    /// With `unread_only` set, read notifications are filtered out.
    async fn list_for_recipient(
        &self,
        recipient: UserId,
        unread_only: bool,
    ) -> NotificationStoreResult<Vec<Notification>>;

    /// Marks a notification read and returns the updated record.
    ///
    /// Marking an already-read notification is a no-op returning the record
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationStoreError::NotificationNotFound`] when the
    /// notification does not exist.
    async fn mark_read(&self, id: NotificationId) -> NotificationStoreResult<Notification>;
}

/// Errors returned by notification store implementations.
#[derive(Debug, Clone, Error)]
pub enum NotificationStoreError {
    /// A notification with the same identifier already exists.
    #[error("duplicate notification identifier: {0}")]
    DuplicateNotification(NotificationId),

    /// The notification was not found.
    #[error("notification not found: {0}")]
    NotificationNotFound(NotificationId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
