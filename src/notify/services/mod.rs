//! Application services for the notification context.

mod dispatcher;
mod inbox;

pub use dispatcher::{DispatcherConfig, NotificationDispatcher};
pub use inbox::{NotificationInboxError, NotificationInboxResult, NotificationInboxService};
