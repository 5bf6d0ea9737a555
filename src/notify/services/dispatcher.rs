//! Converts lifecycle events and deadline findings into notifications.

use async_trait::async_trait;
use minijinja::Environment;
use mockable::Clock;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::deadline::{
    domain::{DeadlineFinding, DeadlineKind},
    ports::{DeadlineFindingSink, DeadlineFindingSinkError, DeadlineFindingSinkResult},
};
use crate::notify::{
    domain::{Notification, NotificationKind, NotifyDomainError},
    ports::{EmailSink, NotificationStore, NotificationStoreError, RecipientDirectory},
};
use crate::task::{
    domain::{TaskEvent, TaskId, TaskStatus, UserId},
    ports::{TaskEventSink, TaskEventSinkError, TaskEventSinkResult},
};

const EMAIL_BODY_TEMPLATE: &str = "{{ message }}\n\nTask: {{ task_id }}\nKind: {{ kind }}\n";

/// Tuning knobs for the notification dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatcherConfig {
    /// Also notify the task owner about deadline findings when the owner
    /// is not the assignee.
    pub copy_owner_on_deadline: bool,
}

/// Maps events and findings onto stored notifications plus one best-effort
/// email each.
///
/// The stored record is authoritative: a store failure propagates to the
/// caller, while email-path failures (missing address, render, delivery)
/// are logged and swallowed. Each notification gets exactly one email
/// attempt.
#[derive(Clone)]
pub struct NotificationDispatcher<N, E, D, C>
where
    N: NotificationStore,
    E: EmailSink,
    D: RecipientDirectory,
    C: Clock + Send + Sync,
{
    store: Arc<N>,
    email: Arc<E>,
    directory: Arc<D>,
    clock: Arc<C>,
    config: DispatcherConfig,
}

impl<N, E, D, C> NotificationDispatcher<N, E, D, C>
where
    N: NotificationStore,
    E: EmailSink,
    D: RecipientDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new dispatcher over the given store, sink, and directory.
    #[must_use]
    pub const fn new(
        store: Arc<N>,
        email: Arc<E>,
        directory: Arc<D>,
        clock: Arc<C>,
        config: DispatcherConfig,
    ) -> Self {
        Self {
            store,
            email,
            directory,
            clock,
            config,
        }
    }

    /// Stores one notification, then makes its single email attempt.
    async fn deliver(
        &self,
        recipient: UserId,
        kind: NotificationKind,
        task_id: TaskId,
        message: String,
    ) -> Result<(), DispatchError> {
        let notification =
            Notification::new(recipient, kind, task_id, message, self.clock.as_ref())?;
        self.store.store(&notification).await?;
        self.send_email(&notification).await;
        Ok(())
    }

    /// Best-effort email leg. Never fails the dispatch.
    async fn send_email(&self, notification: &Notification) {
        let address = match self.directory.lookup(notification.recipient()).await {
            Ok(Some(address)) => address,
            Ok(None) => {
                debug!(
                    recipient = %notification.recipient(),
                    "no email address on file; notification is in-app only"
                );
                return;
            }
            Err(e) => {
                warn!(
                    err = %e,
                    recipient = %notification.recipient(),
                    "recipient lookup failed; email skipped"
                );
                return;
            }
        };
        let body = match render_email_body(notification) {
            Ok(body) => body,
            Err(e) => {
                warn!(
                    err = %e,
                    notification_id = %notification.id(),
                    "email body rendering failed; email skipped"
                );
                return;
            }
        };
        let subject = subject_for(notification.kind());
        if let Err(e) = self.email.send(&address, subject, &body).await {
            warn!(
                err = %e,
                notification_id = %notification.id(),
                "email delivery failed; stored notification remains authoritative"
            );
        }
    }
}

#[async_trait]
impl<N, E, D, C> TaskEventSink for NotificationDispatcher<N, E, D, C>
where
    N: NotificationStore,
    E: EmailSink,
    D: RecipientDirectory,
    C: Clock + Send + Sync,
{
    async fn publish(&self, event: &TaskEvent) -> TaskEventSinkResult<()> {
        match event {
            TaskEvent::Assigned {
                task_id,
                title,
                assignee,
                due_at,
                ..
            } => {
                let message = format!(
                    "You were assigned task {title:?}, due {}.",
                    due_at.to_rfc3339()
                );
                self.deliver(*assignee, NotificationKind::TaskAssigned, *task_id, message)
                    .await
                    .map_err(TaskEventSinkError::delivery)
            }
            TaskEvent::StatusChanged {
                task_id,
                title,
                assignee,
                to,
                reason,
                ..
            } => {
                let mapped = match to {
                    TaskStatus::Approved => Some((
                        NotificationKind::TaskApproved,
                        format!("Your task {title:?} was approved."),
                    )),
                    TaskStatus::Rejected => Some((
                        NotificationKind::TaskRejected,
                        reason.as_ref().map_or_else(
                            || format!("Your task {title:?} was rejected."),
                            |text| format!("Your task {title:?} was rejected: {text}"),
                        ),
                    )),
                    TaskStatus::Pending | TaskStatus::InProgress | TaskStatus::Submitted => None,
                };
                let Some((kind, message)) = mapped else {
                    return Ok(());
                };
                self.deliver(*assignee, kind, *task_id, message)
                    .await
                    .map_err(TaskEventSinkError::delivery)
            }
        }
    }
}

#[async_trait]
impl<N, E, D, C> DeadlineFindingSink for NotificationDispatcher<N, E, D, C>
where
    N: NotificationStore,
    E: EmailSink,
    D: RecipientDirectory,
    C: Clock + Send + Sync,
{
    async fn forward(&self, finding: &DeadlineFinding) -> DeadlineFindingSinkResult<()> {
        let due = finding.due_at.to_rfc3339();
        let (kind, message) = match finding.kind {
            DeadlineKind::Approaching => (
                NotificationKind::DeadlineApproaching,
                format!("Task {:?} is due {due}.", finding.title),
            ),
            DeadlineKind::Overdue => (
                NotificationKind::DeadlineOverdue,
                format!("Task {:?} is overdue; it was due {due}.", finding.title),
            ),
        };
        self.deliver(finding.assignee, kind, finding.task_id, message.clone())
            .await
            .map_err(DeadlineFindingSinkError::delivery)?;
        if self.config.copy_owner_on_deadline && finding.owner != finding.assignee {
            self.deliver(finding.owner, kind, finding.task_id, message)
                .await
                .map_err(DeadlineFindingSinkError::delivery)?;
        }
        Ok(())
    }
}

/// Dispatch failure on the authoritative store leg.
#[derive(Debug, Error)]
enum DispatchError {
    #[error(transparent)]
    Domain(#[from] NotifyDomainError),
    #[error(transparent)]
    Store(#[from] NotificationStoreError),
}

const fn subject_for(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::TaskAssigned => "Task assigned to you",
        NotificationKind::TaskApproved => "Task approved",
        NotificationKind::TaskRejected => "Task rejected",
        NotificationKind::DeadlineApproaching => "Task deadline approaching",
        NotificationKind::DeadlineOverdue => "Task overdue",
    }
}

fn render_email_body(notification: &Notification) -> Result<String, minijinja::Error> {
    let mut environment = Environment::new();
    // Render the template verbatim; minijinja otherwise strips its final newline.
    environment.set_keep_trailing_newline(true);
    let context = build_email_context(notification);
    environment.render_str(EMAIL_BODY_TEMPLATE, context)
}

fn build_email_context(notification: &Notification) -> Map<String, Value> {
    let mut context = Map::new();
    context.insert(
        "message".to_owned(),
        Value::String(notification.message().to_owned()),
    );
    context.insert(
        "task_id".to_owned(),
        Value::String(notification.task_id().to_string()),
    );
    context.insert(
        "kind".to_owned(),
        Value::String(notification.kind().as_str().to_owned()),
    );
    context
}
