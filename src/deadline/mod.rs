//! Deadline bounded context.
//!
//! Watches open tasks for due timestamps that are approaching or already
//! past, and forwards at-most-once findings to the notification layer.
//! Follows the same hexagonal layout as the task context: domain model,
//! ports, adapters, and services.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
