//! Deadline services: the evaluator and its background ticker.

mod evaluator;
mod ticker;

pub use evaluator::{
    DeadlineEvaluator, DeadlineEvaluatorError, DeadlineEvaluatorResult, EvaluatorConfig,
};
pub use ticker::run_deadline_ticker;
