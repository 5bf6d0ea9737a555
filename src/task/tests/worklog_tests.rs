//! Work log validation and correction service tests.

use std::sync::Arc;

use crate::task::{
    adapters::memory::{InMemoryTaskStore, InMemoryWorkLogStore},
    domain::{
        Actor, NewTask, Priority, Role, Task, TaskDomainError, TaskId, UserId, WorkLog,
        WorkLogCorrection, WorkLogId,
    },
    ports::{TaskStore, TaskStoreError, WorkLogStoreError},
    services::{CorrectWorkLogRequest, LogWorkRequest, WorkLogService, WorkLogServiceError},
};
use crate::testkit::{ManualClock, utc_datetime};
use chrono::{NaiveDate, TimeDelta, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = WorkLogService<InMemoryWorkLogStore, InMemoryTaskStore, DefaultClock>;

struct Harness {
    service: TestService,
    tasks: Arc<InMemoryTaskStore>,
}

#[fixture]
fn harness() -> Harness {
    let logs = Arc::new(InMemoryWorkLogStore::new());
    let tasks = Arc::new(InMemoryTaskStore::new());
    let service = WorkLogService::new(logs, Arc::clone(&tasks), Arc::new(DefaultClock));
    Harness { service, tasks }
}

fn work_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 14).expect("valid work date")
}

async fn seed_task(store: &InMemoryTaskStore, owner: UserId, assignee: UserId) -> Task {
    let task = Task::new(
        NewTask {
            title: "Prepare quarterly report".to_owned(),
            description: "Figures and commentary for the quarter".to_owned(),
            owner,
            assignee,
            priority: Priority::Medium,
            due_at: Utc::now() + TimeDelta::days(30),
        },
        &DefaultClock,
    )
    .expect("seed task");
    store.store(&task).await.expect("store seed task");
    task
}

// ---------------------------------------------------------------------------
// Domain validation
// ---------------------------------------------------------------------------

#[rstest]
#[case(0.0)]
#[case(-4.0)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn work_log_rejects_non_positive_or_non_finite_hours(#[case] hours: f64) {
    let result = WorkLog::new(
        TaskId::new(),
        UserId::new(),
        hours,
        "Reviewed the draft",
        work_date(),
        &DefaultClock,
    );

    assert!(matches!(result, Err(TaskDomainError::InvalidHours { .. })));
}

#[rstest]
#[case("")]
#[case("   ")]
fn work_log_rejects_blank_descriptions(#[case] description: &str) {
    let result = WorkLog::new(
        TaskId::new(),
        UserId::new(),
        2.5,
        description,
        work_date(),
        &DefaultClock,
    );

    assert!(matches!(result, Err(TaskDomainError::EmptyWorkDescription)));
}

#[rstest]
fn work_log_trims_the_description() {
    let entry = WorkLog::new(
        TaskId::new(),
        UserId::new(),
        2.5,
        "  Reviewed the draft  ",
        work_date(),
        &DefaultClock,
    )
    .expect("work log");

    assert_eq!(entry.description(), "Reviewed the draft");
}

#[rstest]
fn correction_requires_an_explanatory_note() {
    let result = WorkLogCorrection::new(
        WorkLogId::new(),
        UserId::new(),
        "   ",
        Some(2.0),
        None,
        &DefaultClock,
    );

    assert!(matches!(result, Err(TaskDomainError::EmptyNote)));
}

#[rstest]
fn correction_validates_amended_hours() {
    let result = WorkLogCorrection::new(
        WorkLogId::new(),
        UserId::new(),
        "Fat-fingered the hours",
        Some(-1.0),
        None,
        &DefaultClock,
    );

    assert!(matches!(result, Err(TaskDomainError::InvalidHours { .. })));
}

// ---------------------------------------------------------------------------
// Service orchestration
// ---------------------------------------------------------------------------

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn log_work_appends_an_entry_for_the_assignee(harness: Harness) {
    let assignee = Actor::new(UserId::new(), Role::Member);
    let task = seed_task(&harness.tasks, UserId::new(), assignee.id()).await;

    let entry = harness
        .service
        .log_work(
            LogWorkRequest::new(task.id(), 3.5, "Drafted the summary", work_date()),
            &assignee,
        )
        .await
        .expect("log work");

    assert_eq!(entry.task_id(), task.id());
    assert_eq!(entry.author(), assignee.id());
    assert_eq!(entry.hours(), 3.5);
    assert_eq!(entry.logged_on(), work_date());

    let listed = harness
        .service
        .list_for_task(task.id())
        .await
        .expect("list work logs");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].log, entry);
    assert!(listed[0].correction.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn log_work_allows_an_admin_on_behalf_of_the_assignee(harness: Harness) {
    let admin = Actor::new(UserId::new(), Role::Admin);
    let task = seed_task(&harness.tasks, UserId::new(), UserId::new()).await;

    let entry = harness
        .service
        .log_work(
            LogWorkRequest::new(task.id(), 1.0, "Unblocked the deploy", work_date()),
            &admin,
        )
        .await
        .expect("log work as admin");

    assert_eq!(entry.author(), admin.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn log_work_refuses_callers_other_than_the_assignee(harness: Harness) {
    let owner = Actor::new(UserId::new(), Role::Lead);
    let task = seed_task(&harness.tasks, owner.id(), UserId::new()).await;

    let result = harness
        .service
        .log_work(
            LogWorkRequest::new(task.id(), 1.0, "Looked it over", work_date()),
            &owner,
        )
        .await;

    assert!(matches!(
        result,
        Err(WorkLogServiceError::Domain(TaskDomainError::Forbidden { caller, .. }))
            if caller == owner.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn log_work_against_an_unknown_task_is_not_found(harness: Harness) {
    let caller = Actor::new(UserId::new(), Role::Member);
    let missing = TaskId::new();

    let result = harness
        .service
        .log_work(
            LogWorkRequest::new(missing, 1.0, "Ghost work", work_date()),
            &caller,
        )
        .await;

    assert!(matches!(
        result,
        Err(WorkLogServiceError::Tasks(TaskStoreError::TaskNotFound(id))) if id == missing
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn correction_pairs_with_its_entry_in_the_listing(harness: Harness) {
    let assignee = Actor::new(UserId::new(), Role::Member);
    let admin = Actor::new(UserId::new(), Role::Admin);
    let task = seed_task(&harness.tasks, UserId::new(), assignee.id()).await;
    let entry = harness
        .service
        .log_work(
            LogWorkRequest::new(task.id(), 8.0, "Full day on the migration", work_date()),
            &assignee,
        )
        .await
        .expect("log work");

    let correction = harness
        .service
        .correct_work_log(
            CorrectWorkLogRequest::new(entry.id(), "Half of this was the following day")
                .with_hours(4.0)
                .with_description("Migration, first half"),
            &admin,
        )
        .await
        .expect("correct work log");

    assert_eq!(correction.work_log_id(), entry.id());
    assert_eq!(correction.corrected_by(), admin.id());
    assert_eq!(correction.corrected_hours(), Some(4.0));
    assert_eq!(correction.corrected_description(), Some("Migration, first half"));

    let listed = harness
        .service
        .list_for_task(task.id())
        .await
        .expect("list work logs");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].log, entry);
    assert_eq!(listed[0].correction.as_ref(), Some(&correction));
}

#[rstest]
#[case(Role::Member)]
#[case(Role::Lead)]
#[tokio::test(flavor = "multi_thread")]
async fn corrections_are_admin_only(harness: Harness, #[case] role: Role) {
    let assignee = Actor::new(UserId::new(), Role::Member);
    let task = seed_task(&harness.tasks, UserId::new(), assignee.id()).await;
    let entry = harness
        .service
        .log_work(
            LogWorkRequest::new(task.id(), 2.0, "Paired on the review", work_date()),
            &assignee,
        )
        .await
        .expect("log work");

    let caller = Actor::new(UserId::new(), role);
    let result = harness
        .service
        .correct_work_log(
            CorrectWorkLogRequest::new(entry.id(), "Let me fix that myself"),
            &caller,
        )
        .await;

    assert!(matches!(
        result,
        Err(WorkLogServiceError::Domain(TaskDomainError::Forbidden { caller: rejected, .. }))
            if rejected == caller.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_second_correction_is_rejected(harness: Harness) {
    let assignee = Actor::new(UserId::new(), Role::Member);
    let admin = Actor::new(UserId::new(), Role::Admin);
    let task = seed_task(&harness.tasks, UserId::new(), assignee.id()).await;
    let entry = harness
        .service
        .log_work(
            LogWorkRequest::new(task.id(), 6.0, "Load test run", work_date()),
            &assignee,
        )
        .await
        .expect("log work");
    harness
        .service
        .correct_work_log(
            CorrectWorkLogRequest::new(entry.id(), "Rig was down for an hour").with_hours(5.0),
            &admin,
        )
        .await
        .expect("first correction");

    let result = harness
        .service
        .correct_work_log(
            CorrectWorkLogRequest::new(entry.id(), "Second thoughts").with_hours(4.0),
            &admin,
        )
        .await;

    assert!(matches!(
        result,
        Err(WorkLogServiceError::Domain(TaskDomainError::WorkLogAlreadyCorrected(id)))
            if id == entry.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn correction_against_an_unknown_entry_is_not_found(harness: Harness) {
    let admin = Actor::new(UserId::new(), Role::Admin);
    let missing = WorkLogId::new();

    let result = harness
        .service
        .correct_work_log(CorrectWorkLogRequest::new(missing, "Nothing to fix"), &admin)
        .await;

    assert!(matches!(
        result,
        Err(WorkLogServiceError::WorkLogs(WorkLogStoreError::WorkLogNotFound(id)))
            if id == missing
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_returns_entries_newest_first() {
    let logs = Arc::new(InMemoryWorkLogStore::new());
    let tasks = Arc::new(InMemoryTaskStore::new());
    let clock = Arc::new(ManualClock::at(utc_datetime(2026, 8, 10, 9, 0, 0)));
    let service = WorkLogService::new(logs, Arc::clone(&tasks), Arc::clone(&clock));
    let assignee = Actor::new(UserId::new(), Role::Member);
    let task = seed_task(&tasks, UserId::new(), assignee.id()).await;

    let first = service
        .log_work(
            LogWorkRequest::new(task.id(), 1.0, "Morning triage", work_date()),
            &assignee,
        )
        .await
        .expect("first entry");
    clock.advance(TimeDelta::hours(2));
    let second = service
        .log_work(
            LogWorkRequest::new(task.id(), 2.0, "Afternoon deep work", work_date()),
            &assignee,
        )
        .await
        .expect("second entry");

    let listed = service
        .list_for_task(task.id())
        .await
        .expect("list work logs");
    let ids: Vec<_> = listed.iter().map(|entry| entry.log.id()).collect();
    assert_eq!(ids, vec![second.id(), first.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn entries_survive_task_deletion(harness: Harness) {
    let assignee = Actor::new(UserId::new(), Role::Member);
    let task = seed_task(&harness.tasks, UserId::new(), assignee.id()).await;
    let entry = harness
        .service
        .log_work(
            LogWorkRequest::new(task.id(), 2.0, "Wrote the runbook", work_date()),
            &assignee,
        )
        .await
        .expect("log work");

    harness
        .tasks
        .delete_task(task.id())
        .await
        .expect("delete task");

    let listed = harness
        .service
        .list_for_task(task.id())
        .await
        .expect("list work logs");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].log.id(), entry.id());
}
