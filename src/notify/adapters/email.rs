//! Email sink that drops messages instead of delivering them.

use async_trait::async_trait;
use tracing::debug;

use crate::notify::{
    domain::EmailAddress,
    ports::{EmailSink, EmailSinkResult},
};

/// Email sink used when outbound email is switched off.
///
/// Every send succeeds without delivering anything, so notification flow
/// stays identical whether or not a real transport is wired in. This is
/// the default sink: deployments opt in to real delivery.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledEmailSink;

impl DisabledEmailSink {
    /// Creates a disabled sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailSink for DisabledEmailSink {
    async fn send(&self, to: &EmailAddress, subject: &str, _body: &str) -> EmailSinkResult<()> {
        debug!(to = %to, subject, "email delivery disabled; message dropped");
        Ok(())
    }
}
