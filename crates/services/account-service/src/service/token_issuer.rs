//! Access token issuance.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::{AppError, AppResult, JwtConfig};
use domain::AccessToken;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Token issuer trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait TokenIssuer: Send + Sync {
    /// Issue a signed token for `user_id`, valid from `now` for the configured TTL
    fn issue(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<AccessToken>;
}

/// HS256 JWT issuer.
pub struct JwtIssuer {
    encoding_key: EncodingKey,
    ttl_minutes: i64,
}

impl JwtIssuer {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            ttl_minutes: config.ttl_minutes,
        }
    }

    fn expiry(&self, now: DateTime<Utc>) -> AppResult<DateTime<Utc>> {
        Duration::try_minutes(self.ttl_minutes)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::internal(format!(
                    "token ttl of {} minutes overflows the expiry time",
                    self.ttl_minutes
                ))
            })
    }
}

impl TokenIssuer for JwtIssuer {
    fn issue(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<AccessToken> {
        let expires_at = self.expiry(now)?;

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        Ok(AccessToken::new(token, expires_at))
    }
}
