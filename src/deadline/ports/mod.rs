//! Port contracts for deadline evaluation.

pub mod sink;
pub mod watermarks;

pub use sink::{DeadlineFindingSink, DeadlineFindingSinkError, DeadlineFindingSinkResult};
pub use watermarks::{WatermarkStore, WatermarkStoreError, WatermarkStoreResult};
