//! Port contracts for the notification context.

pub mod directory;
pub mod email;
pub mod store;

pub use directory::{RecipientDirectory, RecipientDirectoryError, RecipientDirectoryResult};
pub use email::{EmailSink, EmailSinkError, EmailSinkResult};
pub use store::{NotificationStore, NotificationStoreError, NotificationStoreResult};
