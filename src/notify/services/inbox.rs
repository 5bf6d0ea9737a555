//! Inbox service for reading and acknowledging notifications.

use std::sync::Arc;
use thiserror::Error;

use crate::notify::{
    domain::{Notification, NotificationId, NotifyDomainError},
    ports::{NotificationStore, NotificationStoreError},
};
use crate::task::domain::UserId;

/// Service-level errors for inbox operations.
#[derive(Debug, Error)]
pub enum NotificationInboxError {
    /// Domain rule violation.
    #[error(transparent)]
    Domain(#[from] NotifyDomainError),
    /// Notification store operation failed.
    #[error(transparent)]
    Store(#[from] NotificationStoreError),
}

/// Result type for inbox service operations.
pub type NotificationInboxResult<T> = Result<T, NotificationInboxError>;

/// Read side of the notification context.
///
/// Recipients list their own inbox and acknowledge entries; nothing here
/// creates notifications.
#[derive(Clone)]
pub struct NotificationInboxService<N>
where
    N: NotificationStore,
{
    store: Arc<N>,
}

impl<N> NotificationInboxService<N>
where
    N: NotificationStore,
{
    /// Creates a new inbox service.
    #[must_use]
    pub const fn new(store: Arc<N>) -> Self {
        Self { store }
    }

    /// Lists a recipient's notifications, newest first.
    ///
    /// With `unread_only` set, read notifications are filtered out.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationInboxError::Store`] when the listing fails.
    pub async fn list(
        &self,
        recipient: UserId,
        unread_only: bool,
    ) -> NotificationInboxResult<Vec<Notification>> {
        Ok(self
            .store
            .list_for_recipient(recipient, unread_only)
            .await?)
    }

    /// Marks a notification read on behalf of its recipient.
    ///
    /// Marking an already-read notification succeeds without another
    /// write.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationStoreError::NotificationNotFound`] when the
    /// notification does not exist and
    /// [`NotifyDomainError::ForeignNotification`] when it belongs to a
    /// different recipient.
    pub async fn mark_read(
        &self,
        id: NotificationId,
        caller: UserId,
    ) -> NotificationInboxResult<Notification> {
        let notification = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(NotificationStoreError::NotificationNotFound(id))?;
        if notification.recipient() != caller {
            return Err(NotifyDomainError::ForeignNotification {
                caller,
                notification_id: id,
            }
            .into());
        }
        if notification.is_read() {
            return Ok(notification);
        }
        Ok(self.store.mark_read(id).await?)
    }
}
