//! In-memory adapters backing the task ports for tests and embedded use.

mod store;
mod worklog;

pub use store::InMemoryTaskStore;
pub use worklog::InMemoryWorkLogStore;
