//! Notification transport seam
//!
//! Delivery is fire-and-forget: the row is already committed when
//! [`NotificationTransport::publish`] runs, and a failed or absent
//! delivery never affects the underlying mutation.

use async_trait::async_trait;
use boards_core::entity::{Notification, NotificationType};
use boards_core::Result;
use boards_db::models::NotificationRow;
use boards_db::repo::{members, notifications};
use chrono::Utc;
use sqlx::SqliteConnection;

/// Best-effort delivery of a notification to a connected client.
#[async_trait]
pub trait NotificationTransport: Send + Sync {
    /// Push the notification towards the receiving user. Must not fail
    /// the caller; implementations swallow and log delivery errors.
    async fn publish(&self, receiver_user_id: i64, notification: &Notification);
}

/// Transport that drops everything, for callers that mutate without
/// anyone listening.
#[derive(Debug, Default)]
pub struct NullTransport;

#[async_trait]
impl NotificationTransport for NullTransport {
    async fn publish(&self, _receiver_user_id: i64, _notification: &Notification) {}
}

/// A notification recorded inside a transaction, waiting for the commit
/// before being handed to the transport.
#[derive(Debug, Clone)]
pub struct Outbound {
    /// User id behind the receiving member
    pub receiver_user_id: i64,
    /// The persisted notification
    pub notification: Notification,
}

/// Persist a notification row on the current transaction and return the
/// outbound event to publish after commit.
///
/// Callers guarantee sender != receiver; self-addressed events are
/// filtered at the call sites (assignment, invites).
pub async fn record(
    conn: &mut SqliteConnection,
    notification_type: NotificationType,
    sender_member_id: i64,
    receiver_member_id: i64,
    project_id: Option<i64>,
    issue_id: Option<i64>,
) -> Result<Outbound> {
    let timestamp = Utc::now();
    let row = NotificationRow {
        id: 0,
        notification_type: notification_type.as_str().to_string(),
        sender_member_id,
        receiver_member_id,
        issue_id,
        project_id,
        timestamp,
        read: false,
    };
    let id = notifications::insert(conn, &row)
        .await
        .map_err(boards_core::Error::from)?;

    let receiver = members::find_by_id(conn, receiver_member_id)
        .await
        .map_err(boards_core::Error::from)?
        .ok_or_else(|| boards_core::Error::member_not_found(receiver_member_id))?;

    Ok(Outbound {
        receiver_user_id: receiver.user_id,
        notification: Notification {
            id,
            notification_type,
            sender_member_id,
            receiver_member_id,
            issue_id,
            project_id,
            timestamp,
            read: false,
        },
    })
}

/// Publish recorded notifications after the transaction committed.
pub async fn publish_all(transport: &dyn NotificationTransport, outbound: &[Outbound]) {
    for event in outbound {
        transport
            .publish(event.receiver_user_id, &event.notification)
            .await;
    }
}
