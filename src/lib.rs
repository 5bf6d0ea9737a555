//! TaskGrid: task lifecycle and deadline-notification engine.
//!
//! This crate provides the coordination core of a small-team task tracker:
//! the task state machine with subtask dependencies and work logs, the
//! periodic deadline evaluator, and the notification dispatcher feeding
//! per-user inboxes and an email sink.
//!
//! # Architecture
//!
//! TaskGrid follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory stores,
//!   the disabled email sink)
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle, subtasks, work logs, and lifecycle events
//! - [`deadline`]: Periodic due-date evaluation with idempotent watermarks
//! - [`notify`]: Notification records, inbox reads, and email dispatch

pub mod deadline;
pub mod notify;
pub mod task;

#[cfg(test)]
mod testkit;
