//! Validated email addresses for outbound delivery.

use crate::notify::domain::error::NotifyDomainError;
use std::fmt;

/// Email address checked for basic shape at construction.
///
/// Validation is intentionally shallow: one `@` separating a non-empty
/// local part from a non-empty domain, with no whitespace. Deliverability
/// is the email sink's problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parses and validates an email address.
    ///
    /// Surrounding whitespace is trimmed; the stored form is the trimmed
    /// input.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyDomainError::InvalidEmailAddress`] when the input
    /// does not look like `local@domain`.
    pub fn new(raw: impl Into<String>) -> Result<Self, NotifyDomainError> {
        let text = raw.into();
        let trimmed = text.trim();
        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(NotifyDomainError::InvalidEmailAddress(trimmed.to_owned()));
        };
        let malformed = local.is_empty()
            || domain.is_empty()
            || trimmed.chars().any(char::is_whitespace)
            || domain.contains('@');
        if malformed {
            return Err(NotifyDomainError::InvalidEmailAddress(trimmed.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the address and returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = NotifyDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
