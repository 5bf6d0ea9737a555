//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod events;
pub mod store;
pub mod worklog;

pub use events::{TaskEventSink, TaskEventSinkError, TaskEventSinkResult};
pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
pub use worklog::{WorkLogStore, WorkLogStoreError, WorkLogStoreResult};
