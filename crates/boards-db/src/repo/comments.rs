//! Comment queries

use crate::models::CommentRow;
use crate::Result;
use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

/// Insert a new comment, returning its id
pub async fn insert(
    conn: &mut SqliteConnection,
    issue_id: i64,
    created_by_member_id: i64,
    created_on: DateTime<Utc>,
    body: &str,
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO comments (issue_id, created_by_member_id, created_on, body)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(issue_id)
    .bind(created_by_member_id)
    .bind(created_on)
    .bind(body)
    .execute(&mut *conn)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Get comment by id
pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Option<CommentRow>> {
    let row = sqlx::query_as::<_, CommentRow>("SELECT * FROM comments WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

/// Get all comments of an issue, newest first
pub async fn list_by_issue(conn: &mut SqliteConnection, issue_id: i64) -> Result<Vec<CommentRow>> {
    let rows = sqlx::query_as::<_, CommentRow>(
        "SELECT * FROM comments WHERE issue_id = ? ORDER BY created_on DESC",
    )
    .bind(issue_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

/// Replace the body and stamp the edit time
pub async fn update_body(
    conn: &mut SqliteConnection,
    id: i64,
    body: &str,
    last_updated_on: DateTime<Utc>,
) -> Result<()> {
    sqlx::query("UPDATE comments SET body = ?, last_updated_on = ? WHERE id = ?")
        .bind(body)
        .bind(last_updated_on)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Delete the comment row
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    sqlx::query("DELETE FROM comments WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Delete all comments authored by the member
pub async fn delete_by_author(conn: &mut SqliteConnection, member_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM comments WHERE created_by_member_id = ?")
        .bind(member_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
