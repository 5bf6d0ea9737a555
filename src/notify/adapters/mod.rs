//! Adapter implementations for the notification ports.

mod email;
pub mod memory;

pub use email::DisabledEmailSink;
pub use memory::{InMemoryNotificationStore, InMemoryRecipientDirectory};
