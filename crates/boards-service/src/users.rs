//! User accounts
//!
//! Profile updates are self-service (global admins may also edit and
//! delete accounts). Deleting a user removes their memberships and
//! notifications and unlinks them from issues, which keep existing with
//! nulled references.

use crate::auth::{self, db_err};
use crate::caller::Caller;
use boards_core::entity::User;
use boards_core::{Error, Result};
use boards_db::repo::{issues, members, notifications, users};
use boards_db::DbPool;
use tracing::info;

/// User account operations.
#[derive(Clone)]
pub struct UserService {
    pool: DbPool,
}

impl UserService {
    /// Create the service.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get all users.
    pub async fn get_all_users(&self) -> Result<Vec<User>> {
        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;
        let rows = users::list_all(&mut conn).await?;
        rows.into_iter()
            .map(|r| r.into_domain().map_err(Into::into))
            .collect()
    }

    /// Get one user by id.
    pub async fn get_user(&self, id: i64) -> Result<User> {
        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;
        find_user(&mut conn, id).await
    }

    /// Get one user by email.
    pub async fn get_user_by_email(&self, email: &str) -> Result<User> {
        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;
        let row = users::find_by_email(&mut conn, email)
            .await?
            .ok_or_else(|| Error::UserNotFound(email.to_string()))?;
        Ok(row.into_domain()?)
    }

    /// Delete a user and cascade their footprint. Self or global admin.
    pub async fn delete_user(&self, caller: &Caller, user_id: i64) -> Result<()> {
        if !caller.is_self_or_admin(user_id) {
            return Err(Error::unauthorized(
                "Authenticated user is unauthorized to delete this user.",
            ));
        }

        let mut tx = self.pool.begin().await?;

        notifications::delete_by_user(&mut tx, user_id).await?;
        issues::null_member_refs_by_user(&mut tx, user_id).await?;
        members::delete_all_by_user(&mut tx, user_id).await?;
        users::delete(&mut tx, user_id).await?;

        tx.commit().await.map_err(db_err)?;
        info!(user_id, "user deleted");
        Ok(())
    }

    /// Update name and profile fields. Self or global admin.
    pub async fn update_user_details(
        &self,
        caller: &Caller,
        user_id: i64,
        name: &str,
        company: Option<&str>,
        location: Option<&str>,
    ) -> Result<User> {
        if !caller.is_self_or_admin(user_id) {
            return Err(Error::unauthorized(
                "Authenticated user is unauthorized to update this user's details.",
            ));
        }

        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;
        find_user(&mut conn, user_id).await?;
        users::update_details(&mut conn, user_id, name, company, location).await?;
        find_user(&mut conn, user_id).await
    }

    /// Change the email address. Self only; the new address must be free.
    /// Returns the updated user so the server can issue a fresh token.
    pub async fn update_user_email(
        &self,
        caller: &Caller,
        user_id: i64,
        new_email: &str,
    ) -> Result<User> {
        if caller.user_id != user_id {
            return Err(Error::unauthorized(
                "Authenticated user is unauthorized to change this user's email.",
            ));
        }

        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;
        let user = find_user(&mut conn, user_id).await?;

        if user.email == new_email {
            return Err(Error::EmailAlreadyExists(format!(
                "User's email is already {new_email}"
            )));
        }
        if users::exists_by_email(&mut conn, new_email).await? {
            return Err(Error::EmailAlreadyExists(new_email.to_string()));
        }

        users::update_email(&mut conn, user_id, new_email).await?;
        find_user(&mut conn, user_id).await
    }

    /// Change the password. Self only; the current password must verify.
    pub async fn update_user_password(
        &self,
        caller: &Caller,
        user_id: i64,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        if caller.user_id != user_id {
            return Err(Error::unauthorized(
                "Authenticated user is unauthorized to change this user's password.",
            ));
        }

        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;
        let user = find_user(&mut conn, user_id).await?;

        if !auth::verify_password(&user.password_hash, current_password)? {
            return Err(Error::InvalidCredentials);
        }

        let hash = auth::hash_password(new_password)?;
        users::update_password(&mut conn, user_id, &hash).await?;
        Ok(())
    }

    /// Replace the profile picture, returning the stored bytes. Self only.
    pub async fn update_user_picture(
        &self,
        caller: &Caller,
        user_id: i64,
        picture: Vec<u8>,
    ) -> Result<Vec<u8>> {
        if caller.user_id != user_id {
            return Err(Error::unauthorized(
                "Authenticated user is unauthorized to update this user's picture.",
            ));
        }

        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;
        find_user(&mut conn, user_id).await?;
        users::update_picture(&mut conn, user_id, Some(&picture)).await?;
        Ok(picture)
    }

    /// Clear the profile picture. Self only.
    pub async fn delete_user_picture(&self, caller: &Caller, user_id: i64) -> Result<()> {
        if caller.user_id != user_id {
            return Err(Error::unauthorized(
                "Authenticated user is unauthorized to delete this user's picture.",
            ));
        }

        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;
        find_user(&mut conn, user_id).await?;
        users::update_picture(&mut conn, user_id, None).await?;
        Ok(())
    }
}

async fn find_user(conn: &mut sqlx::SqliteConnection, id: i64) -> Result<User> {
    let row = users::find_by_id(conn, id)
        .await?
        .ok_or_else(|| Error::UserNotFound(id.to_string()))?;
    Ok(row.into_domain()?)
}
