//! Domain model tests for notifications and email addresses.

use crate::notify::domain::{
    EmailAddress, Notification, NotificationKind, NotifyDomainError, ParseNotificationKindError,
};
use crate::task::domain::{TaskId, UserId};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
fn email_address_trims_surrounding_whitespace() {
    let address = EmailAddress::new("  lena@example.com  ").expect("email address");

    assert_eq!(address.as_str(), "lena@example.com");
    assert_eq!(address.to_string(), "lena@example.com");
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("plain")]
#[case("@example.com")]
#[case("lena@")]
#[case("le na@example.com")]
#[case("lena@exam ple.com")]
#[case("lena@@example.com")]
fn email_address_rejects_malformed_input(#[case] raw: &str) {
    let result = EmailAddress::new(raw);

    assert!(matches!(
        result,
        Err(NotifyDomainError::InvalidEmailAddress(_))
    ));
}

#[rstest]
#[case(NotificationKind::TaskAssigned, "task_assigned")]
#[case(NotificationKind::TaskApproved, "task_approved")]
#[case(NotificationKind::TaskRejected, "task_rejected")]
#[case(NotificationKind::DeadlineApproaching, "deadline_approaching")]
#[case(NotificationKind::DeadlineOverdue, "deadline_overdue")]
fn notification_kind_round_trips_its_storage_form(
    #[case] kind: NotificationKind,
    #[case] text: &str,
) {
    assert_eq!(kind.as_str(), text);
    assert_eq!(NotificationKind::try_from(text).expect("parse kind"), kind);
}

#[rstest]
fn unknown_notification_kind_is_rejected() {
    let result = NotificationKind::try_from("carrier_pigeon");

    assert!(matches!(
        result,
        Err(ParseNotificationKindError(text)) if text == "carrier_pigeon"
    ));
}

#[rstest]
fn notification_starts_unread_with_a_trimmed_message() {
    let recipient = UserId::new();
    let task_id = TaskId::new();

    let notification = Notification::new(
        recipient,
        NotificationKind::TaskAssigned,
        task_id,
        "  You were assigned a task.  ",
        &DefaultClock,
    )
    .expect("notification");

    assert_eq!(notification.recipient(), recipient);
    assert_eq!(notification.task_id(), task_id);
    assert_eq!(notification.message(), "You were assigned a task.");
    assert!(!notification.is_read());
}

#[rstest]
#[case("")]
#[case("   ")]
fn notification_rejects_blank_messages(#[case] message: &str) {
    let result = Notification::new(
        UserId::new(),
        NotificationKind::TaskApproved,
        TaskId::new(),
        message,
        &DefaultClock,
    );

    assert!(matches!(result, Err(NotifyDomainError::EmptyMessage)));
}

#[rstest]
fn mark_read_reports_the_first_flip_only() {
    let mut notification = Notification::new(
        UserId::new(),
        NotificationKind::DeadlineOverdue,
        TaskId::new(),
        "Task is overdue.",
        &DefaultClock,
    )
    .expect("notification");

    assert!(notification.mark_read());
    assert!(notification.is_read());
    assert!(!notification.mark_read());
    assert!(notification.is_read());
}
