//! Adapter implementations of the deadline ports.

pub mod memory;

pub use memory::InMemoryWatermarkStore;
