//! In-memory notification store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::notify::{
    domain::{Notification, NotificationId},
    ports::{NotificationStore, NotificationStoreError, NotificationStoreResult},
};
use crate::task::domain::UserId;

/// Thread-safe in-memory notification store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationStore {
    state: Arc<RwLock<InMemoryNotificationState>>,
}

/// Records keep an insertion sequence so newest-first listings stay stable
/// when two notifications share a creation timestamp.
#[derive(Debug, Default)]
struct InMemoryNotificationState {
    records: HashMap<NotificationId, StoredNotification>,
    next_seq: u64,
}

#[derive(Debug, Clone)]
struct StoredNotification {
    seq: u64,
    record: Notification,
}

impl InMemoryNotificationStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationStore for InMemoryNotificationStore {
    async fn store(&self, notification: &Notification) -> NotificationStoreResult<()> {
        let mut state = self.state.write().map_err(|e| {
            NotificationStoreError::persistence(std::io::Error::other(e.to_string()))
        })?;
        if state.records.contains_key(&notification.id()) {
            return Err(NotificationStoreError::DuplicateNotification(
                notification.id(),
            ));
        }
        let seq = state.next_seq;
        state.next_seq += 1;
        state.records.insert(
            notification.id(),
            StoredNotification {
                seq,
                record: notification.clone(),
            },
        );
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: NotificationId,
    ) -> NotificationStoreResult<Option<Notification>> {
        let state = self.state.read().map_err(|e| {
            NotificationStoreError::persistence(std::io::Error::other(e.to_string()))
        })?;
        Ok(state.records.get(&id).map(|stored| stored.record.clone()))
    }

    async fn list_for_recipient(
        &self,
        recipient: UserId,
        unread_only: bool,
    ) -> NotificationStoreResult<Vec<Notification>> {
        let state = self.state.read().map_err(|e| {
            NotificationStoreError::persistence(std::io::Error::other(e.to_string()))
        })?;
        let mut matching: Vec<&StoredNotification> = state
            .records
            .values()
            .filter(|stored| stored.record.recipient() == recipient)
            .filter(|stored| !unread_only || !stored.record.is_read())
            .collect();
        matching.sort_by_key(|stored| std::cmp::Reverse((stored.record.created_at(), stored.seq)));
        Ok(matching
            .into_iter()
            .map(|stored| stored.record.clone())
            .collect())
    }

    async fn mark_read(&self, id: NotificationId) -> NotificationStoreResult<Notification> {
        let mut state = self.state.write().map_err(|e| {
            NotificationStoreError::persistence(std::io::Error::other(e.to_string()))
        })?;
        let stored = state
            .records
            .get_mut(&id)
            .ok_or(NotificationStoreError::NotificationNotFound(id))?;
        let _ = stored.record.mark_read();
        Ok(stored.record.clone())
    }
}
