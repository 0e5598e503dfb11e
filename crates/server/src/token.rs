//! Access token codec
//!
//! Tokens are signed JWTs carrying the user's id, email and global
//! access role. The service layer never sees raw tokens; the codec
//! lives entirely in this crate.

use boards_core::entity::User;
use boards_core::{Error, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The user's email
    pub sub: String,
    /// The user's id
    pub uid: i64,
    /// Global access role, `USER` or `ADMIN`
    pub role: String,
    /// Expiry, seconds since the epoch
    pub exp: usize,
}

/// Issues and verifies access tokens.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl TokenCodec {
    /// Build a codec from the shared signing secret.
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Issue a fresh token for the user.
    pub fn issue(&self, user: &User) -> Result<String> {
        let claims = Claims {
            sub: user.email.clone(),
            uid: user.id,
            role: user.access_role.as_str().to_string(),
            exp: (Utc::now().timestamp() as u64 + self.ttl_secs) as usize,
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| Error::storage(format!("token encoding failed: {e}")))
    }

    /// Verify a token and return its claims. Any defect, including
    /// expiry, reads as bad credentials.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| Error::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boards_core::AccessRole;

    fn test_user() -> User {
        User {
            id: 7,
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password_hash: String::new(),
            company: None,
            location: None,
            picture: None,
            access_role: AccessRole::User,
        }
    }

    #[test]
    fn test_token_round_trip() {
        let codec = TokenCodec::new("test-secret", 3600);
        let token = codec.issue(&test_user()).unwrap();
        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.uid, 7);
        assert_eq!(claims.sub, "ada@example.com");
        assert_eq!(claims.role, "USER");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let codec = TokenCodec::new("test-secret", 3600);
        let other = TokenCodec::new("other-secret", 3600);
        let token = codec.issue(&test_user()).unwrap();
        assert!(matches!(
            other.verify(&token).unwrap_err(),
            Error::InvalidCredentials
        ));
    }
}
