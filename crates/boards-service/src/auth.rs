//! Signup, login and password hashing

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use boards_core::entity::User;
use boards_core::{AccessRole, Error, Result};
use boards_db::{repo::users, DbPool};
use tracing::info;

/// Hash a password with argon2 and a fresh salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::storage(format!("password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored hash.
pub fn verify_password(hash: &str, password: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| Error::storage(format!("stored password hash is invalid: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Account creation and credential checks.
#[derive(Clone)]
pub struct AuthService {
    pool: DbPool,
}

impl AuthService {
    /// Create the service.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Register a new account with the USER access role.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<User> {
        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;

        if users::exists_by_email(&mut conn, email).await? {
            return Err(Error::EmailAlreadyExists(email.to_string()));
        }

        let password_hash = hash_password(password)?;
        let id = users::insert(
            &mut conn,
            name,
            email,
            &password_hash,
            AccessRole::User.as_str(),
        )
        .await?;

        info!(user_id = id, "user signed up");
        let user = users::find_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| Error::UserNotFound(id.to_string()))?;
        Ok(user.into_domain()?)
    }

    /// Check credentials and return the account.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;

        let user = users::find_by_email(&mut conn, email)
            .await?
            .ok_or_else(|| Error::UserNotFound(email.to_string()))?
            .into_domain()?;

        if !verify_password(&user.password_hash, password)? {
            return Err(Error::InvalidCredentials);
        }
        Ok(user)
    }
}

pub(crate) fn db_err(err: sqlx::Error) -> Error {
    Error::Storage(err.to_string())
}
