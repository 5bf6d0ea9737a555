//! Recipient directory port resolving users to email addresses.

use crate::notify::domain::EmailAddress;
use crate::task::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for recipient directory operations.
pub type RecipientDirectoryResult<T> = Result<T, RecipientDirectoryError>;

/// Lookup seam from user identity to email address.
///
/// User management lives outside this core; the directory only answers
/// whether a user has a deliverable address. A `None` answer is normal and
/// means the user gets in-app notifications only.
#[async_trait]
pub trait RecipientDirectory: Send + Sync {
    /// Resolves a user's email address, if one is on file.
    ///
    /// # Errors
    ///
    /// Returns [`RecipientDirectoryError::Lookup`] when the directory could
    /// not be consulted.
    async fn lookup(&self, user: UserId) -> RecipientDirectoryResult<Option<EmailAddress>>;
}

/// Errors returned by recipient directory implementations.
#[derive(Debug, Clone, Error)]
pub enum RecipientDirectoryError {
    /// The directory could not be consulted.
    #[error("recipient lookup error: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),
}

impl RecipientDirectoryError {
    /// Wraps a lookup error.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(err))
    }
}
