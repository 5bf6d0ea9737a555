//! Unit tests for the task context.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code uses indexing after length checks"
)]
#![expect(
    clippy::float_cmp,
    reason = "Tests compare hours values stored and returned verbatim"
)]

mod domain_tests;
mod worklog_tests;
