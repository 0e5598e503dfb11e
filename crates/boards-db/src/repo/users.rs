//! User queries

use crate::models::UserRow;
use crate::Result;
use sqlx::SqliteConnection;

/// Insert a new user, returning its id
pub async fn insert(
    conn: &mut SqliteConnection,
    name: &str,
    email: &str,
    password_hash: &str,
    access_role: &str,
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (name, email, password_hash, access_role)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(access_role)
    .execute(&mut *conn)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Get user by id
pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

/// Get user by email
pub async fn find_by_email(conn: &mut SqliteConnection, email: &str) -> Result<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

/// Whether a user with the email exists
pub async fn exists_by_email(conn: &mut SqliteConnection, email: &str) -> Result<bool> {
    Ok(find_by_email(conn, email).await?.is_some())
}

/// Get all users
pub async fn list_all(conn: &mut SqliteConnection) -> Result<Vec<UserRow>> {
    let rows = sqlx::query_as::<_, UserRow>("SELECT * FROM users ORDER BY id")
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows)
}

/// Update profile fields
pub async fn update_details(
    conn: &mut SqliteConnection,
    id: i64,
    name: &str,
    company: Option<&str>,
    location: Option<&str>,
) -> Result<()> {
    sqlx::query("UPDATE users SET name = ?, company = ?, location = ? WHERE id = ?")
        .bind(name)
        .bind(company)
        .bind(location)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Update email address
pub async fn update_email(conn: &mut SqliteConnection, id: i64, email: &str) -> Result<()> {
    sqlx::query("UPDATE users SET email = ? WHERE id = ?")
        .bind(email)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Update password hash
pub async fn update_password(
    conn: &mut SqliteConnection,
    id: i64,
    password_hash: &str,
) -> Result<()> {
    sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
        .bind(password_hash)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Set or clear the profile picture
pub async fn update_picture(
    conn: &mut SqliteConnection,
    id: i64,
    picture: Option<&[u8]>,
) -> Result<()> {
    sqlx::query("UPDATE users SET picture = ? WHERE id = ?")
        .bind(picture)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Delete the user row
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
