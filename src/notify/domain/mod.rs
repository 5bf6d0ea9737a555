//! Domain model for the notification context.

mod email;
mod error;
mod notification;

pub use email::EmailAddress;
pub use error::{NotifyDomainError, ParseNotificationKindError};
pub use notification::{Notification, NotificationId, NotificationKind};
