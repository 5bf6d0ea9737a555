//! In-memory recipient directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::notify::{
    domain::EmailAddress,
    ports::{RecipientDirectory, RecipientDirectoryError, RecipientDirectoryResult},
};
use crate::task::domain::UserId;

/// Thread-safe in-memory recipient directory.
///
/// Users without a registered address resolve to `None`, which the
/// dispatcher treats as "in-app notifications only".
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecipientDirectory {
    state: Arc<RwLock<HashMap<UserId, EmailAddress>>>,
}

impl InMemoryRecipientDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces a user's email address.
    ///
    /// # Errors
    ///
    /// Returns [`RecipientDirectoryError::Lookup`] when the directory state
    /// is unavailable.
    pub fn register(&self, user: UserId, address: EmailAddress) -> RecipientDirectoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|e| RecipientDirectoryError::lookup(std::io::Error::other(e.to_string())))?;
        state.insert(user, address);
        Ok(())
    }
}

#[async_trait]
impl RecipientDirectory for InMemoryRecipientDirectory {
    async fn lookup(&self, user: UserId) -> RecipientDirectoryResult<Option<EmailAddress>> {
        let state = self
            .state
            .read()
            .map_err(|e| RecipientDirectoryError::lookup(std::io::Error::other(e.to_string())))?;
        Ok(state.get(&user).cloned())
    }
}
