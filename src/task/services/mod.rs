//! Application services for task lifecycle orchestration.

mod lifecycle;
mod worklog;

pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
    TransitionTaskRequest,
};
pub use worklog::{
    CorrectWorkLogRequest, LogWorkRequest, WorkLogService, WorkLogServiceError,
    WorkLogServiceResult,
};
