//! Domain-focused tests for task, subtask, and audit note behaviour.

use crate::task::domain::{
    Actor, NewTask, PersistedTaskData, Priority, Role, Subtask, Task, TaskDomainError, TaskId,
    TaskStatus, UserId,
};
use crate::testkit::{ManualClock, utc_datetime};
use chrono::{TimeDelta, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn new_task_spec(owner: UserId, assignee: UserId) -> NewTask {
    NewTask {
        title: "Prepare quarterly report".to_owned(),
        description: "Collect the team's worklog numbers".to_owned(),
        owner,
        assignee,
        priority: Priority::High,
        due_at: Utc::now() + TimeDelta::days(30),
    }
}

fn persisted_task(status: TaskStatus, owner: UserId, assignee: UserId) -> Task {
    let created_at = utc_datetime(2026, 8, 1, 9, 0, 0);
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: "Archived report".to_owned(),
        description: String::new(),
        owner,
        assignee,
        priority: Priority::Medium,
        status,
        due_at: utc_datetime(2026, 8, 20, 17, 0, 0),
        created_at,
        updated_at: created_at,
        subtask_ids: Vec::new(),
        approval: None,
        audit_notes: Vec::new(),
        version: 4,
    })
}

#[rstest]
#[case("admin", Role::Admin)]
#[case("lead", Role::Lead)]
#[case("member", Role::Member)]
#[case("  Admin  ", Role::Admin)]
fn role_parses_known_values(#[case] input: &str, #[case] expected: Role) {
    assert_eq!(Role::try_from(input).expect("known role"), expected);
}

#[rstest]
fn role_parsing_rejects_unknown_value() {
    let result = Role::try_from("manager");
    assert!(result.is_err());
}

#[rstest]
#[case(Role::Admin, true, true)]
#[case(Role::Lead, true, false)]
#[case(Role::Member, false, false)]
fn role_permissions_match_expectations(
    #[case] role: Role,
    #[case] creates: bool,
    #[case] decides: bool,
) {
    assert_eq!(role.can_create_tasks(), creates);
    assert_eq!(role.can_decide_approvals(), decides);
}

#[rstest]
#[case("low", Priority::Low)]
#[case("URGENT", Priority::Urgent)]
fn priority_parses_known_values(#[case] input: &str, #[case] expected: Priority) {
    assert_eq!(Priority::try_from(input).expect("known priority"), expected);
}

#[rstest]
fn priority_orders_by_urgency() {
    assert!(Priority::Low < Priority::Medium);
    assert!(Priority::Medium < Priority::High);
    assert!(Priority::High < Priority::Urgent);
}

#[rstest]
fn task_new_starts_pending_with_zero_version() {
    let clock = ManualClock::at(utc_datetime(2026, 8, 10, 9, 0, 0));
    let owner = UserId::new();
    let assignee = UserId::new();

    let task = Task::new(new_task_spec(owner, assignee), &clock).expect("valid task");

    assert_eq!(task.status(), TaskStatus::Pending);
    assert_eq!(task.owner(), owner);
    assert_eq!(task.assignee(), assignee);
    assert_eq!(task.created_at(), utc_datetime(2026, 8, 10, 9, 0, 0));
    assert_eq!(task.created_at(), task.updated_at());
    assert_eq!(task.version(), 0);
    assert!(task.approval().is_none());
    assert!(task.subtask_ids().is_empty());
}

#[rstest]
fn task_new_trims_title(clock: DefaultClock) {
    let mut spec = new_task_spec(UserId::new(), UserId::new());
    spec.title = "  Prepare quarterly report  ".to_owned();

    let task = Task::new(spec, &clock).expect("valid task");
    assert_eq!(task.title(), "Prepare quarterly report");
}

#[rstest]
#[case("")]
#[case("   ")]
fn task_new_rejects_blank_title(#[case] title: &str, clock: DefaultClock) {
    let mut spec = new_task_spec(UserId::new(), UserId::new());
    spec.title = title.to_owned();

    let result = Task::new(spec, &clock);
    assert_eq!(result, Err(TaskDomainError::EmptyTitle));
}

#[rstest]
fn task_new_rejects_due_not_in_future() {
    let clock = ManualClock::at(utc_datetime(2026, 8, 10, 9, 0, 0));
    let mut spec = new_task_spec(UserId::new(), UserId::new());
    spec.due_at = utc_datetime(2026, 8, 10, 9, 0, 0);

    let result = Task::new(spec, &clock);
    assert_eq!(
        result,
        Err(TaskDomainError::DueNotInFuture {
            due: utc_datetime(2026, 8, 10, 9, 0, 0)
        })
    );
}

#[rstest]
fn updated_at_moves_strictly_forward_under_a_frozen_clock() {
    let clock = ManualClock::at(utc_datetime(2026, 8, 10, 9, 0, 0));
    let mut task = Task::new(new_task_spec(UserId::new(), UserId::new()), &clock)
        .expect("valid task");

    let first = Subtask::new(task.id(), "Gather numbers", &clock).expect("valid subtask");
    task.attach_subtask(first.id(), &clock).expect("attach");
    let after_first = task.updated_at();

    let second = Subtask::new(task.id(), "Draft summary", &clock).expect("valid subtask");
    task.attach_subtask(second.id(), &clock).expect("attach");
    let after_second = task.updated_at();

    assert!(after_first > task.created_at());
    assert!(after_second > after_first);
    assert_eq!(task.version(), 2);
    assert_eq!(task.subtask_ids(), [first.id(), second.id()]);
}

#[rstest]
fn attach_subtask_rejected_on_approved_task(clock: DefaultClock) {
    let mut task = persisted_task(TaskStatus::Approved, UserId::new(), UserId::new());
    let subtask = Subtask::new(task.id(), "Late addition", &clock).expect("valid subtask");

    let result = task.attach_subtask(subtask.id(), &clock);
    assert_eq!(result, Err(TaskDomainError::TaskLocked(task.id())));
}

#[rstest]
fn add_audit_note_requires_admin(clock: DefaultClock) {
    let mut task = persisted_task(TaskStatus::Approved, UserId::new(), UserId::new());
    let member = Actor::new(UserId::new(), Role::Member);

    let result = task.add_audit_note(&member, "Retro note", &clock);
    assert!(matches!(result, Err(TaskDomainError::Forbidden { .. })));
    assert!(task.audit_notes().is_empty());
}

#[rstest]
fn add_audit_note_works_on_approved_task(clock: DefaultClock) {
    let mut task = persisted_task(TaskStatus::Approved, UserId::new(), UserId::new());
    let admin = Actor::new(UserId::new(), Role::Admin);
    let version_before = task.version();

    task.add_audit_note(&admin, "  Closed after the audit window.  ", &clock)
        .expect("admin note");

    assert_eq!(task.audit_notes().len(), 1);
    assert_eq!(task.audit_notes()[0].body, "Closed after the audit window.");
    assert_eq!(task.audit_notes()[0].author, admin.id());
    assert_eq!(task.version(), version_before + 1);
}

#[rstest]
fn add_audit_note_rejects_blank_body(clock: DefaultClock) {
    let mut task = persisted_task(TaskStatus::InProgress, UserId::new(), UserId::new());
    let admin = Actor::new(UserId::new(), Role::Admin);

    let result = task.add_audit_note(&admin, "   ", &clock);
    assert_eq!(result, Err(TaskDomainError::EmptyNote));
}

#[rstest]
fn subtask_new_rejects_blank_title(clock: DefaultClock) {
    let result = Subtask::new(TaskId::new(), "  ", &clock);
    assert_eq!(result, Err(TaskDomainError::EmptyTitle));
}

#[rstest]
fn subtask_completion_is_idempotent() {
    let clock = ManualClock::at(utc_datetime(2026, 8, 10, 9, 0, 0));
    let first_user = UserId::new();
    let second_user = UserId::new();
    let mut subtask = Subtask::new(TaskId::new(), "Gather numbers", &clock).expect("subtask");

    assert!(subtask.complete(first_user, &clock));
    let completed_at = subtask.completed_at();

    clock.advance(TimeDelta::hours(1));
    assert!(!subtask.complete(second_user, &clock));

    assert!(subtask.is_done());
    assert_eq!(subtask.completed_by(), Some(first_user));
    assert_eq!(subtask.completed_at(), completed_at);
}
