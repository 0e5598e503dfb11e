//! Project queries

use crate::models::ProjectRow;
use crate::Result;
use sqlx::SqliteConnection;

/// Insert a new project, returning its id
pub async fn insert(
    conn: &mut SqliteConnection,
    name: &str,
    key: &str,
    icon: Option<&[u8]>,
) -> Result<i64> {
    let result = sqlx::query("INSERT INTO projects (name, key, icon) VALUES (?, ?, ?)")
        .bind(name)
        .bind(key)
        .bind(icon)
        .execute(&mut *conn)
        .await?;
    Ok(result.last_insert_rowid())
}

/// Get project by id
pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Option<ProjectRow>> {
    let row = sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

/// Find a project of the given user that collides on name or key.
///
/// `exclude_id` skips the project being updated so it does not collide
/// with itself.
pub async fn find_duplicate(
    conn: &mut SqliteConnection,
    name: &str,
    key: &str,
    user_id: i64,
    exclude_id: Option<i64>,
) -> Result<Option<ProjectRow>> {
    let row = match exclude_id {
        Some(project_id) => {
            sqlx::query_as::<_, ProjectRow>(
                r#"
                SELECT p.* FROM projects p
                JOIN members m ON m.project_id = p.id
                WHERE (p.name = ? OR p.key = ?) AND m.user_id = ? AND p.id <> ?
                LIMIT 1
                "#,
            )
            .bind(name)
            .bind(key)
            .bind(user_id)
            .bind(project_id)
            .fetch_optional(&mut *conn)
            .await?
        }
        None => {
            sqlx::query_as::<_, ProjectRow>(
                r#"
                SELECT p.* FROM projects p
                JOIN members m ON m.project_id = p.id
                WHERE (p.name = ? OR p.key = ?) AND m.user_id = ?
                LIMIT 1
                "#,
            )
            .bind(name)
            .bind(key)
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await?
        }
    };
    Ok(row)
}

/// Get all projects the user participates in
pub async fn list_by_user(conn: &mut SqliteConnection, user_id: i64) -> Result<Vec<ProjectRow>> {
    let rows = sqlx::query_as::<_, ProjectRow>(
        r#"
        SELECT p.* FROM projects p
        JOIN members m ON m.project_id = p.id
        WHERE m.user_id = ?
        ORDER BY p.id
        "#,
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

/// Update name and key
pub async fn update_details(
    conn: &mut SqliteConnection,
    id: i64,
    name: &str,
    key: &str,
) -> Result<()> {
    sqlx::query("UPDATE projects SET name = ?, key = ? WHERE id = ?")
        .bind(name)
        .bind(key)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Set or clear the icon
pub async fn update_icon(
    conn: &mut SqliteConnection,
    id: i64,
    icon: Option<&[u8]>,
) -> Result<()> {
    sqlx::query("UPDATE projects SET icon = ? WHERE id = ?")
        .bind(icon)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Delete the project row and everything it owns (members, issues,
/// comments). Notifications are scoped separately by the caller.
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    sqlx::query(
        "DELETE FROM comments WHERE issue_id IN (SELECT id FROM issues WHERE project_id = ?)",
    )
    .bind(id)
    .execute(&mut *conn)
    .await?;
    sqlx::query("DELETE FROM issues WHERE project_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM members WHERE project_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM projects WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
