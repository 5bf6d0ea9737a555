//! In-memory adapters for the notification ports.

mod directory;
mod store;

pub use directory::InMemoryRecipientDirectory;
pub use store::InMemoryNotificationStore;
