//! Inbox listing and acknowledgement tests.

use std::sync::Arc;

use crate::notify::{
    adapters::InMemoryNotificationStore,
    domain::{Notification, NotificationId, NotificationKind, NotifyDomainError},
    ports::{NotificationStore, NotificationStoreError},
    services::{NotificationInboxError, NotificationInboxService},
};
use crate::task::domain::{TaskId, UserId};
use crate::testkit::{ManualClock, utc_datetime};
use chrono::TimeDelta;
use rstest::{fixture, rstest};

struct Harness {
    service: NotificationInboxService<InMemoryNotificationStore>,
    store: Arc<InMemoryNotificationStore>,
    clock: ManualClock,
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(InMemoryNotificationStore::new());
    let service = NotificationInboxService::new(Arc::clone(&store));
    Harness {
        service,
        store,
        clock: ManualClock::at(utc_datetime(2026, 8, 10, 9, 0, 0)),
    }
}

/// Stores a notification stamped with the harness clock, then advances the
/// clock so the next seed lands strictly later.
async fn seed(harness: &Harness, recipient: UserId, message: &str) -> Notification {
    let notification = Notification::new(
        recipient,
        NotificationKind::TaskAssigned,
        TaskId::new(),
        message,
        &harness.clock,
    )
    .expect("notification");
    harness
        .store
        .store(&notification)
        .await
        .expect("store notification");
    harness.clock.advance(TimeDelta::minutes(5));
    notification
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_returns_the_recipients_notifications_newest_first(harness: Harness) {
    let alice = UserId::new();
    let bob = UserId::new();
    let first = seed(&harness, alice, "First notice").await;
    let second = seed(&harness, alice, "Second notice").await;
    seed(&harness, bob, "Someone else's notice").await;
    let third = seed(&harness, alice, "Third notice").await;

    let inbox = harness.service.list(alice, false).await.expect("list");

    let ids: Vec<_> = inbox.iter().map(Notification::id).collect();
    assert_eq!(ids, vec![third.id(), second.id(), first.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unread_only_filters_acknowledged_entries(harness: Harness) {
    let alice = UserId::new();
    let first = seed(&harness, alice, "First notice").await;
    let second = seed(&harness, alice, "Second notice").await;
    let third = seed(&harness, alice, "Third notice").await;
    harness
        .service
        .mark_read(second.id(), alice)
        .await
        .expect("mark read");

    let unread = harness.service.list(alice, true).await.expect("list unread");
    let ids: Vec<_> = unread.iter().map(Notification::id).collect();
    assert_eq!(ids, vec![third.id(), first.id()]);

    let all = harness.service.list(alice, false).await.expect("list all");
    assert_eq!(all.len(), 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mark_read_flips_the_stored_record(harness: Harness) {
    let alice = UserId::new();
    let notification = seed(&harness, alice, "Please acknowledge").await;

    let updated = harness
        .service
        .mark_read(notification.id(), alice)
        .await
        .expect("mark read");
    assert!(updated.is_read());

    let stored = harness
        .store
        .find_by_id(notification.id())
        .await
        .expect("find notification")
        .expect("notification present");
    assert!(stored.is_read());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn marking_twice_succeeds_without_another_write(harness: Harness) {
    let alice = UserId::new();
    let notification = seed(&harness, alice, "Please acknowledge").await;
    harness
        .service
        .mark_read(notification.id(), alice)
        .await
        .expect("first mark");

    let again = harness
        .service
        .mark_read(notification.id(), alice)
        .await
        .expect("second mark");

    assert!(again.is_read());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn anothers_notification_cannot_be_acknowledged(harness: Harness) {
    let alice = UserId::new();
    let bob = UserId::new();
    let notification = seed(&harness, alice, "Alice's notice").await;

    let result = harness.service.mark_read(notification.id(), bob).await;

    assert!(matches!(
        result,
        Err(NotificationInboxError::Domain(NotifyDomainError::ForeignNotification {
            caller,
            notification_id,
        })) if caller == bob && notification_id == notification.id()
    ));

    let stored = harness
        .store
        .find_by_id(notification.id())
        .await
        .expect("find notification")
        .expect("notification present");
    assert!(!stored.is_read());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn acknowledging_a_missing_notification_is_not_found(harness: Harness) {
    let missing = NotificationId::new();

    let result = harness.service.mark_read(missing, UserId::new()).await;

    assert!(matches!(
        result,
        Err(NotificationInboxError::Store(NotificationStoreError::NotificationNotFound(id)))
            if id == missing
    ));
}
