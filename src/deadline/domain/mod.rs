//! Domain model for deadline evaluation.

mod finding;
mod watermark;

pub use finding::{DeadlineFinding, DeadlineKind};
pub use watermark::DeadlineWatermark;
