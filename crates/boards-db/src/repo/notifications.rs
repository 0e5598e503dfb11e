//! Notification queries

use crate::models::NotificationRow;
use crate::Result;
use sqlx::SqliteConnection;

/// Insert a new notification, returning its id. `row.id` is ignored.
pub async fn insert(conn: &mut SqliteConnection, row: &NotificationRow) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO notifications (notification_type, sender_member_id, receiver_member_id,
                                   issue_id, project_id, timestamp, read)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&row.notification_type)
    .bind(row.sender_member_id)
    .bind(row.receiver_member_id)
    .bind(row.issue_id)
    .bind(row.project_id)
    .bind(row.timestamp)
    .bind(row.read)
    .execute(&mut *conn)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Get notification by id
pub async fn find_by_id(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<NotificationRow>> {
    let row = sqlx::query_as::<_, NotificationRow>("SELECT * FROM notifications WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

/// Get all notifications addressed to any of the user's members, newest first
pub async fn list_by_receiver_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<NotificationRow>> {
    let rows = sqlx::query_as::<_, NotificationRow>(
        r#"
        SELECT n.* FROM notifications n
        JOIN members m ON m.id = n.receiver_member_id
        WHERE m.user_id = ?
        ORDER BY n.timestamp DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

/// Set the read flag
pub async fn update_read(conn: &mut SqliteConnection, id: i64, read: bool) -> Result<()> {
    sqlx::query("UPDATE notifications SET read = ? WHERE id = ?")
        .bind(read)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Delete one notification
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    sqlx::query("DELETE FROM notifications WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Delete all notifications addressed to any of the user's members
pub async fn delete_all_by_receiver_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM notifications
        WHERE receiver_member_id IN (SELECT id FROM members WHERE user_id = ?)
        "#,
    )
    .bind(user_id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Delete notifications where the member is sender or receiver
pub async fn delete_by_member(conn: &mut SqliteConnection, member_id: i64) -> Result<()> {
    sqlx::query(
        "DELETE FROM notifications WHERE sender_member_id = ? OR receiver_member_id = ?",
    )
    .bind(member_id)
    .bind(member_id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Delete all notifications scoped to a project
pub async fn delete_by_project(conn: &mut SqliteConnection, project_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM notifications WHERE project_id = ?")
        .bind(project_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Delete all notifications scoped to an issue
pub async fn delete_by_issue(conn: &mut SqliteConnection, issue_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM notifications WHERE issue_id = ?")
        .bind(issue_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Delete notifications sent or received by any of the user's members
pub async fn delete_by_user(conn: &mut SqliteConnection, user_id: i64) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM notifications
        WHERE receiver_member_id IN (SELECT id FROM members WHERE user_id = ?)
           OR sender_member_id IN (SELECT id FROM members WHERE user_id = ?)
        "#,
    )
    .bind(user_id)
    .bind(user_id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}
