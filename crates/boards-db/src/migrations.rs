//! Embedded database migrations

use crate::Result;
use sqlx::SqlitePool;
use tracing::info;

/// Migration version
pub const CURRENT_VERSION: i32 = 1;

/// SQL migrations, applied in order
pub const MIGRATIONS: &[&str] = &[
    // Migration 1: Initial schema
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        company TEXT,
        location TEXT,
        picture BLOB,
        access_role TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS projects (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        key TEXT NOT NULL,
        icon BLOB
    );

    CREATE TABLE IF NOT EXISTS members (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id),
        project_id INTEGER NOT NULL REFERENCES projects(id),
        role TEXT NOT NULL,
        joined_on TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_members_user ON members(user_id);
    CREATE INDEX IF NOT EXISTS idx_members_project ON members(project_id);

    CREATE TABLE IF NOT EXISTS issues (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        project_id INTEGER NOT NULL REFERENCES projects(id),
        key TEXT NOT NULL,
        key_number INTEGER NOT NULL,
        title TEXT NOT NULL,
        description TEXT,
        assignee_member_id INTEGER,
        issue_type TEXT NOT NULL,
        status TEXT NOT NULL,
        priority TEXT NOT NULL,
        created_on TEXT NOT NULL,
        updated_on TEXT,
        due_on TEXT,
        created_by_member_id INTEGER
    );

    CREATE INDEX IF NOT EXISTS idx_issues_project ON issues(project_id);

    CREATE TABLE IF NOT EXISTS comments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        issue_id INTEGER NOT NULL REFERENCES issues(id),
        created_by_member_id INTEGER NOT NULL REFERENCES members(id),
        created_on TEXT NOT NULL,
        last_updated_on TEXT,
        body TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_comments_issue ON comments(issue_id);

    CREATE TABLE IF NOT EXISTS notifications (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        notification_type TEXT NOT NULL,
        sender_member_id INTEGER NOT NULL,
        receiver_member_id INTEGER NOT NULL,
        issue_id INTEGER,
        project_id INTEGER,
        timestamp TEXT NOT NULL,
        read INTEGER NOT NULL DEFAULT 0
    );

    CREATE INDEX IF NOT EXISTS idx_notifications_receiver ON notifications(receiver_member_id);

    CREATE TABLE IF NOT EXISTS schema_version (
        version INTEGER PRIMARY KEY,
        applied_at TEXT NOT NULL
    );

    INSERT OR IGNORE INTO schema_version (version, applied_at)
    VALUES (1, datetime('now'));
    "#,
];

/// Run all pending migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    for (idx, migration) in MIGRATIONS.iter().enumerate() {
        sqlx::raw_sql(migration).execute(pool).await?;
        info!(migration = idx + 1, "applied migration");
    }
    Ok(())
}
