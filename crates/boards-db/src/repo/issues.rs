//! Issue queries

use crate::models::IssueRow;
use crate::Result;
use sqlx::SqliteConnection;

/// Insert a new issue, returning its id. `row.id` is ignored.
pub async fn insert(conn: &mut SqliteConnection, row: &IssueRow) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO issues (project_id, key, key_number, title, description,
                            assignee_member_id, issue_type, status, priority,
                            created_on, updated_on, due_on, created_by_member_id)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(row.project_id)
    .bind(&row.key)
    .bind(row.key_number)
    .bind(&row.title)
    .bind(&row.description)
    .bind(row.assignee_member_id)
    .bind(&row.issue_type)
    .bind(&row.status)
    .bind(&row.priority)
    .bind(row.created_on)
    .bind(row.updated_on)
    .bind(row.due_on)
    .bind(row.created_by_member_id)
    .execute(&mut *conn)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Get issue by id
pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Option<IssueRow>> {
    let row = sqlx::query_as::<_, IssueRow>("SELECT * FROM issues WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

/// Get all issues of a project
pub async fn list_by_project(
    conn: &mut SqliteConnection,
    project_id: i64,
) -> Result<Vec<IssueRow>> {
    let rows = sqlx::query_as::<_, IssueRow>(
        "SELECT * FROM issues WHERE project_id = ? ORDER BY id",
    )
    .bind(project_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

/// Highest issue key number currently held by a project's issues.
///
/// Gaps left by deleted issues below the maximum are never refilled.
pub async fn max_key_number(
    conn: &mut SqliteConnection,
    project_id: i64,
) -> Result<Option<i64>> {
    let row: (Option<i64>,) =
        sqlx::query_as("SELECT MAX(key_number) FROM issues WHERE project_id = ?")
            .bind(project_id)
            .fetch_one(&mut *conn)
            .await?;
    Ok(row.0)
}

/// Full-field overwrite of an existing issue
pub async fn update(conn: &mut SqliteConnection, row: &IssueRow) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE issues
        SET title = ?, description = ?, assignee_member_id = ?, issue_type = ?,
            status = ?, priority = ?, updated_on = ?, due_on = ?
        WHERE id = ?
        "#,
    )
    .bind(&row.title)
    .bind(&row.description)
    .bind(row.assignee_member_id)
    .bind(&row.issue_type)
    .bind(&row.status)
    .bind(&row.priority)
    .bind(row.updated_on)
    .bind(row.due_on)
    .bind(row.id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Set the status field only
pub async fn update_status(conn: &mut SqliteConnection, id: i64, status: &str) -> Result<()> {
    sqlx::query("UPDATE issues SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Null out assignee/creator references pointing at the member
pub async fn null_member_refs(conn: &mut SqliteConnection, member_id: i64) -> Result<()> {
    sqlx::query("UPDATE issues SET assignee_member_id = NULL WHERE assignee_member_id = ?")
        .bind(member_id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("UPDATE issues SET created_by_member_id = NULL WHERE created_by_member_id = ?")
        .bind(member_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Null out assignee/creator references pointing at any member of the user
pub async fn null_member_refs_by_user(conn: &mut SqliteConnection, user_id: i64) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE issues SET assignee_member_id = NULL
        WHERE assignee_member_id IN (SELECT id FROM members WHERE user_id = ?)
        "#,
    )
    .bind(user_id)
    .execute(&mut *conn)
    .await?;
    sqlx::query(
        r#"
        UPDATE issues SET created_by_member_id = NULL
        WHERE created_by_member_id IN (SELECT id FROM members WHERE user_id = ?)
        "#,
    )
    .bind(user_id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Delete the issue row and its comments
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    sqlx::query("DELETE FROM comments WHERE issue_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM issues WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
