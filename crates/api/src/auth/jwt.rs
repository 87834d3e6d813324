//! Access- and refresh-token claims and HS256 signing.
//!
//! Access tokens are short-lived and stateless. Refresh tokens are
//! long-lived and only usable while their SHA-256 digest is in the live
//! token ledger. Each class is signed with its own secret so one can be
//! rotated without invalidating the other.

use chrono::{Duration, Utc};
use inotebook_core::roles::ROLE_USER;
use inotebook_core::types::{DbId, Timestamp};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::{parse_var, required_var, ConfigError};

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: &str = "15";
/// Default refresh token expiry in days.
const DEFAULT_REFRESH_EXPIRY_DAYS: &str = "15";

/// Claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessClaims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier.
    pub jti: String,
}

/// Claims embedded in every refresh token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RefreshClaims {
    pub sub: DbId,
    pub exp: i64,
    pub iat: i64,
    /// Makes tokens minted for the same user in the same second distinct,
    /// so each issuance gets its own ledger row.
    pub jti: String,
}

/// Secrets and lifetimes for both token classes.
#[derive(Clone)]
pub struct TokenConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("access_secret", &"<redacted>")
            .field("refresh_secret", &"<redacted>")
            .field("access_token_expiry_mins", &self.access_token_expiry_mins)
            .field("refresh_token_expiry_days", &self.refresh_token_expiry_days)
            .finish()
    }
}

impl TokenConfig {
    /// Load token configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_ACCESS_SECRET`        | **yes**  | --      |
    /// | `JWT_REFRESH_SECRET`       | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `15`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS`  | no       | `15`    |
    pub fn from_env() -> Result<Self, ConfigError> {
        let access_secret = required_var("JWT_ACCESS_SECRET")?;
        let refresh_secret = required_var("JWT_REFRESH_SECRET")?;
        if access_secret == refresh_secret {
            return Err(ConfigError::SharedSecret);
        }

        Ok(Self {
            access_secret,
            refresh_secret,
            access_token_expiry_mins: parse_var(
                "JWT_ACCESS_EXPIRY_MINS",
                DEFAULT_ACCESS_EXPIRY_MINS,
                "i64",
            )?,
            refresh_token_expiry_days: parse_var(
                "JWT_REFRESH_EXPIRY_DAYS",
                DEFAULT_REFRESH_EXPIRY_DAYS,
                "i64",
            )?,
        })
    }

    /// Refresh token lifetime in seconds; also the cookie `Max-Age`.
    pub fn refresh_max_age_secs(&self) -> i64 {
        self.refresh_token_expiry_days * 24 * 60 * 60
    }
}

/// Sign an access token carrying `{sub, role: "user"}`.
pub fn generate_access_token(
    user_id: DbId,
    config: &TokenConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp();
    let claims = AccessClaims {
        sub: user_id,
        role: ROLE_USER.to_string(),
        exp: now + config.access_token_expiry_mins * 60,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.access_secret.as_bytes()),
    )
}

/// Validate an access token's signature and expiry.
pub fn validate_access_token(
    token: &str,
    config: &TokenConfig,
) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
    let token_data = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(config.access_secret.as_bytes()),
        &validation(),
    )?;
    Ok(token_data.claims)
}

/// Sign a refresh token. Returns the token and its expiry instant.
pub fn generate_refresh_token(
    user_id: DbId,
    config: &TokenConfig,
) -> Result<(String, Timestamp), jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let expires_at = now + Duration::days(config.refresh_token_expiry_days);
    let claims = RefreshClaims {
        sub: user_id,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.refresh_secret.as_bytes()),
    )?;
    Ok((token, expires_at))
}

/// Validate a refresh token's signature and expiry. Ledger membership is
/// checked separately by the token service.
pub fn validate_refresh_token(
    token: &str,
    config: &TokenConfig,
) -> Result<RefreshClaims, jsonwebtoken::errors::Error> {
    let token_data = decode::<RefreshClaims>(
        token,
        &DecodingKey::from_secret(config.refresh_secret.as_bytes()),
        &validation(),
    )?;
    Ok(token_data.claims)
}

/// HS256 with `exp` enforced to the second (no clock-skew leeway).
fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation
}

/// SHA-256 hex digest of a refresh token; the ledger key.
pub fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Helper to build a test config with known secrets.
    pub(crate) fn test_config() -> TokenConfig {
        TokenConfig {
            access_secret: "test-access-secret-long-enough-for-hmac".to_string(),
            refresh_secret: "test-refresh-secret-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 15,
        }
    }

    #[test]
    fn access_token_round_trip_carries_identity_and_role() {
        let config = test_config();
        let token = generate_access_token(42, &config).expect("token generation should succeed");

        let claims = validate_access_token(&token, &config).expect("validation should succeed");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, "user");
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn refresh_token_expires_after_configured_days() {
        let config = test_config();
        let (token, expires_at) = generate_refresh_token(7, &config).unwrap();
        let claims = validate_refresh_token(&token, &config).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.exp, expires_at.timestamp());
        assert_eq!(claims.exp - claims.iat, 15 * 24 * 60 * 60);
    }

    #[test]
    fn expired_access_token_fails() {
        let config = test_config();

        let now = Utc::now().timestamp();
        let claims = AccessClaims {
            sub: 1,
            role: ROLE_USER.to_string(),
            exp: now - 300,
            iat: now - 1200,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.access_secret.as_bytes()),
        )
        .unwrap();

        assert!(validate_access_token(&token, &config).is_err());
    }

    #[test]
    fn tokens_expired_seconds_ago_are_rejected() {
        let config = test_config();
        let now = Utc::now().timestamp();

        let access = encode(
            &Header::default(),
            &AccessClaims {
                sub: 1,
                role: ROLE_USER.to_string(),
                exp: now - 5,
                iat: now - 905,
                jti: Uuid::new_v4().to_string(),
            },
            &EncodingKey::from_secret(config.access_secret.as_bytes()),
        )
        .unwrap();
        let refresh = encode(
            &Header::default(),
            &RefreshClaims {
                sub: 1,
                exp: now - 5,
                iat: now - 100,
                jti: Uuid::new_v4().to_string(),
            },
            &EncodingKey::from_secret(config.refresh_secret.as_bytes()),
        )
        .unwrap();

        assert!(validate_access_token(&access, &config).is_err());
        assert!(validate_refresh_token(&refresh, &config).is_err());
    }

    #[test]
    fn token_classes_are_not_interchangeable() {
        let config = test_config();
        let access = generate_access_token(1, &config).unwrap();
        let (refresh, _) = generate_refresh_token(1, &config).unwrap();

        assert!(validate_refresh_token(&access, &config).is_err());
        assert!(validate_access_token(&refresh, &config).is_err());
    }

    #[test]
    fn consecutive_refresh_tokens_differ() {
        let config = test_config();
        let (a, _) = generate_refresh_token(1, &config).unwrap();
        let (b, _) = generate_refresh_token(1, &config).unwrap();
        assert_ne!(a, b);
        assert_ne!(hash_refresh_token(&a), hash_refresh_token(&b));
    }

    #[test]
    fn refresh_token_hash_is_stable_hex() {
        let hash = hash_refresh_token("some.token.value");
        assert_eq!(hash, hash_refresh_token("some.token.value"));
        assert_eq!(hash.len(), 64);
    }
}
