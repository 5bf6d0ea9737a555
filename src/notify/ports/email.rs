//! Outbound email delivery port.

use crate::notify::domain::EmailAddress;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for email sink operations.
pub type EmailSinkResult<T> = Result<T, EmailSinkError>;

/// Delivery seam for outbound notification emails.
///
/// The dispatcher makes exactly one attempt per notification; a failed
/// attempt is logged and never retried, since the stored notification
/// remains the authoritative record.
#[async_trait]
pub trait EmailSink: Send + Sync {
    /// Sends one email.
    ///
    /// # Errors
    ///
    /// Returns [`EmailSinkError::Delivery`] when the message could not be
    /// handed off.
    async fn send(&self, to: &EmailAddress, subject: &str, body: &str) -> EmailSinkResult<()>;
}

/// Errors returned by email sink implementations.
#[derive(Debug, Clone, Error)]
pub enum EmailSinkError {
    /// The message could not be handed off for delivery.
    #[error("email delivery error: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl EmailSinkError {
    /// Wraps a delivery error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
