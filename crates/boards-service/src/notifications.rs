//! User-facing notification operations
//!
//! Everything here is self-only: a user may read, flag and delete their
//! own notifications and nobody else's.

use crate::auth::db_err;
use crate::caller::Caller;
use boards_core::entity::Notification;
use boards_core::{Error, Result};
use boards_db::repo::notifications;
use boards_db::DbPool;

/// Notification inbox operations.
#[derive(Clone)]
pub struct NotificationService {
    pool: DbPool,
}

impl NotificationService {
    /// Create the service.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// List the user's notifications, newest first.
    pub async fn get_notifications(&self, caller: &Caller, user_id: i64) -> Result<Vec<Notification>> {
        if caller.user_id != user_id {
            return Err(Error::unauthorized(
                "Authenticated user is only authorized to get their own notifications.",
            ));
        }
        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;
        let rows = notifications::list_by_receiver_user(&mut conn, user_id).await?;
        rows.into_iter()
            .map(|r| r.into_domain().map_err(Into::into))
            .collect()
    }

    /// Flip the read flag on one notification.
    pub async fn toggle_read(
        &self,
        caller: &Caller,
        user_id: i64,
        notification_id: i64,
    ) -> Result<()> {
        if caller.user_id != user_id {
            return Err(Error::unauthorized(
                "Authenticated user is only authorized to mark their own notification as read.",
            ));
        }
        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;
        let row = notifications::find_by_id(&mut conn, notification_id)
            .await?
            .ok_or(Error::NotificationNotFound(notification_id))?;
        notifications::update_read(&mut conn, notification_id, !row.read).await?;
        Ok(())
    }

    /// Delete one notification.
    pub async fn delete_notification(
        &self,
        caller: &Caller,
        user_id: i64,
        notification_id: i64,
    ) -> Result<()> {
        if caller.user_id != user_id {
            return Err(Error::unauthorized(
                "Authenticated user is only authorized to delete their own notification.",
            ));
        }
        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;
        notifications::delete(&mut conn, notification_id).await?;
        Ok(())
    }

    /// Delete everything addressed to the user.
    pub async fn delete_all_notifications(&self, caller: &Caller, user_id: i64) -> Result<()> {
        if caller.user_id != user_id {
            return Err(Error::unauthorized(
                "Authenticated user is only authorized to delete their own notifications.",
            ));
        }
        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;
        notifications::delete_all_by_receiver_user(&mut conn, user_id).await?;
        Ok(())
    }
}
