//! Domain model for the task lifecycle.
//!
//! The task domain models assignable work items, their subtask checklists,
//! the approval state machine, and append-only work logs, keeping all
//! infrastructure concerns outside of the domain boundary.

mod actor;
mod error;
mod event;
mod ids;
mod subtask;
mod task;
mod worklog;

pub use actor::{Actor, Role};
pub use error::{ParsePriorityError, ParseRoleError, ParseTaskStatusError, TaskDomainError};
pub use event::TaskEvent;
pub use ids::{SubtaskId, TaskId, UserId, WorkLogId};
pub use subtask::{PersistedSubtaskData, Subtask};
pub use task::{
    ApprovalRecord, AuditNote, NewTask, PersistedTaskData, Priority, Task, TaskStatus,
    TransitionGate,
};
pub use worklog::{PersistedWorkLogData, WorkLog, WorkLogCorrection, WorkLogEntry};
