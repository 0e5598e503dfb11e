//! Member queries

use crate::models::MemberRow;
use crate::Result;
use chrono::NaiveDate;
use sqlx::SqliteConnection;

/// Insert a new member, returning its id
pub async fn insert(
    conn: &mut SqliteConnection,
    user_id: i64,
    project_id: i64,
    role: &str,
    joined_on: NaiveDate,
) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO members (user_id, project_id, role, joined_on) VALUES (?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(project_id)
    .bind(role)
    .bind(joined_on)
    .execute(&mut *conn)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Get member by id
pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Option<MemberRow>> {
    let row = sqlx::query_as::<_, MemberRow>("SELECT * FROM members WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

/// Get member by id scoped to a project
pub async fn find_by_id_and_project(
    conn: &mut SqliteConnection,
    id: i64,
    project_id: i64,
) -> Result<Option<MemberRow>> {
    let row = sqlx::query_as::<_, MemberRow>(
        "SELECT * FROM members WHERE id = ? AND project_id = ?",
    )
    .bind(id)
    .bind(project_id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(row)
}

/// Get a user's membership record for a project
pub async fn find_by_user_and_project(
    conn: &mut SqliteConnection,
    user_id: i64,
    project_id: i64,
) -> Result<Option<MemberRow>> {
    let row = sqlx::query_as::<_, MemberRow>(
        "SELECT * FROM members WHERE user_id = ? AND project_id = ?",
    )
    .bind(user_id)
    .bind(project_id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(row)
}

/// Get all members of a project
pub async fn list_by_project(
    conn: &mut SqliteConnection,
    project_id: i64,
) -> Result<Vec<MemberRow>> {
    let rows = sqlx::query_as::<_, MemberRow>(
        "SELECT * FROM members WHERE project_id = ? ORDER BY id",
    )
    .bind(project_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

/// Get all memberships of a user
pub async fn list_by_user(conn: &mut SqliteConnection, user_id: i64) -> Result<Vec<MemberRow>> {
    let rows = sqlx::query_as::<_, MemberRow>("SELECT * FROM members WHERE user_id = ?")
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows)
}

/// Count members of a project
pub async fn count_by_project(conn: &mut SqliteConnection, project_id: i64) -> Result<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM members WHERE project_id = ?")
        .bind(project_id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(count.0)
}

/// Count members of a project holding the given role
pub async fn count_by_project_and_role(
    conn: &mut SqliteConnection,
    project_id: i64,
    role: &str,
) -> Result<i64> {
    let count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM members WHERE project_id = ? AND role = ?")
            .bind(project_id)
            .bind(role)
            .fetch_one(&mut *conn)
            .await?;
    Ok(count.0)
}

/// Set a member's role
pub async fn update_role(conn: &mut SqliteConnection, id: i64, role: &str) -> Result<()> {
    sqlx::query("UPDATE members SET role = ? WHERE id = ?")
        .bind(role)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Delete the member row
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    sqlx::query("DELETE FROM members WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Delete all memberships of a user
pub async fn delete_all_by_user(conn: &mut SqliteConnection, user_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM members WHERE user_id = ?")
        .bind(user_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
