//! Task lifecycle management for TaskGrid.
//!
//! This module implements the task store and lifecycle manager: creating and
//! assigning tasks, enforcing the approval state machine and its subtask
//! completion gate, cascading deletes, appending work logs, and emitting the
//! lifecycle events the notification dispatcher subscribes to. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
