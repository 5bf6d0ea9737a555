//! Notification bounded context.
//!
//! Turns lifecycle events and deadline findings into per-user inbox
//! records, with one best-effort email attempt per record. The stored
//! notification is always the authoritative copy.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
