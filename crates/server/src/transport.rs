//! Tracing-backed notification transport
//!
//! Stands in for a push channel: committed notifications are surfaced
//! in the server log. Swapping in a real-time transport only requires
//! another `NotificationTransport` impl.

use async_trait::async_trait;
use boards_core::entity::Notification;
use boards_service::NotificationTransport;
use tracing::info;

/// Transport that logs every published notification.
#[derive(Debug, Default)]
pub struct TracingTransport;

#[async_trait]
impl NotificationTransport for TracingTransport {
    async fn publish(&self, receiver_user_id: i64, notification: &Notification) {
        info!(
            receiver_user_id,
            notification_id = notification.id,
            kind = notification.notification_type.as_str(),
            "notification published"
        );
    }
}
