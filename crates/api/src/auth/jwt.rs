//! Access and refresh tokens.
//!
//! Access tokens are HS256 JWTs whose [`Claims`] carry enough to rebuild the
//! request [`Session`] without touching the database. Refresh tokens are
//! opaque; the server keeps only their SHA-256 digest.

use chrono::Duration;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use showcase_core::session::Session;
use showcase_core::types::{DbId, Timestamp};
use uuid::Uuid;

use crate::config::env_parse;

pub type TokenResult<T> = Result<T, jsonwebtoken::errors::Error>;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id.
    pub sub: DbId,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl Claims {
    fn issue(session: &Session, now: i64, ttl_secs: i64) -> Self {
        Self {
            sub: session.user_id,
            email: session.email.clone(),
            role: session.role.clone(),
            exp: now + ttl_secs,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        }
    }

    pub fn session(&self) -> Session {
        Session {
            user_id: self.sub,
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// `JWT_SECRET` (required), `JWT_ACCESS_EXPIRY_MINS` (15),
    /// `JWT_REFRESH_EXPIRY_DAYS` (7).
    ///
    /// # Panics
    ///
    /// Panics if the secret is missing or empty, or an expiry does not parse.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| panic!("JWT_SECRET must be set to a non-empty value"));
        Self {
            secret,
            access_token_expiry_mins: env_parse("JWT_ACCESS_EXPIRY_MINS", 15),
            refresh_token_expiry_days: env_parse("JWT_REFRESH_EXPIRY_DAYS", 7),
        }
    }

    pub fn access_ttl_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }

    pub fn refresh_expires_at(&self, from: Timestamp) -> Timestamp {
        from + Duration::days(self.refresh_token_expiry_days)
    }

    /// Sign an access token for `session`.
    pub fn sign(&self, session: &Session) -> TokenResult<String> {
        let claims = Claims::issue(
            session,
            chrono::Utc::now().timestamp(),
            self.access_ttl_secs(),
        );
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    /// Check signature and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> TokenResult<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
    }
}

/// A freshly minted refresh token. `plaintext` goes to the client once.
pub struct RefreshToken {
    pub plaintext: String,
    pub hash: String,
}

impl RefreshToken {
    pub fn generate() -> Self {
        let plaintext = Uuid::new_v4().simple().to_string();
        let hash = Self::digest(&plaintext);
        Self { plaintext, hash }
    }

    /// Hex SHA-256 of a presented token, as stored in `user_sessions`.
    pub fn digest(plaintext: &str) -> String {
        format!("{:x}", Sha256::digest(plaintext.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        }
    }

    fn ada() -> Session {
        Session {
            user_id: 42,
            email: "ada@example.com".to_string(),
            role: "admin".to_string(),
        }
    }

    #[test]
    fn signed_token_rebuilds_the_session() {
        let config = config();
        let token = config.sign(&ada()).unwrap();

        let claims = config.verify(&token).unwrap();
        assert_eq!(claims.session(), ada());
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = config();
        // Past the default 60 second leeway.
        let stale = Claims::issue(&ada(), chrono::Utc::now().timestamp() - 600, 300);
        let token = encode(
            &Header::default(),
            &stale,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(config.verify(&token).is_err());
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let other = JwtConfig {
            secret: "a-different-secret".to_string(),
            ..config()
        };
        let token = other.sign(&ada()).unwrap();
        assert!(config().verify(&token).is_err());
    }

    #[test]
    fn refresh_digest_matches_generated_hash() {
        let token = RefreshToken::generate();
        assert_eq!(token.hash, RefreshToken::digest(&token.plaintext));
        assert_eq!(token.hash.len(), 64);
        assert_ne!(token.plaintext, RefreshToken::generate().plaintext);
    }
}
