//! JWT access-token generation/validation and OAuth state tokens.
//!
//! Access tokens are HS256-signed JWTs containing a [`Claims`] payload.
//! OAuth `state` values are short-lived HS256 tokens of their own claim
//! shape, so neither kind can be passed off as the other.

use hvlab_core::types::DbId;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    pub username: String,
    /// The user's role name (e.g. `"admin"`, `"worker"`).
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in hours (default: 168).
    pub expiry_hours: i64,
}

/// Default access token expiry in hours (7 days).
const DEFAULT_EXPIRY_HOURS: i64 = 168;

/// OAuth state lifetime in seconds.
const OAUTH_STATE_TTL_SECS: i64 = 600;

const OAUTH_STATE_PURPOSE: &str = "kakao_connect";

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var            | Required | Default |
    /// |--------------------|----------|---------|
    /// | `JWT_SECRET`       | **yes**  | --      |
    /// | `JWT_EXPIRY_HOURS` | no       | `168`   |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let expiry_hours: i64 = std::env::var("JWT_EXPIRY_HOURS")
            .unwrap_or_else(|_| DEFAULT_EXPIRY_HOURS.to_string())
            .parse()
            .expect("JWT_EXPIRY_HOURS must be a valid i64");

        Self {
            secret,
            expiry_hours,
        }
    }

    /// Access token lifetime in seconds.
    pub fn expires_in_secs(&self) -> i64 {
        self.expiry_hours * 3600
    }
}

/// Generate an HS256 access token for the given user.
pub fn generate_access_token(
    user_id: DbId,
    username: &str,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        role: role.to_string(),
        exp: now + config.expires_in_secs(),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an access token, returning the embedded [`Claims`].
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

// ---------------------------------------------------------------------------
// OAuth state
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct OAuthStateClaims {
    sub: DbId,
    purpose: String,
    exp: i64,
    iat: i64,
}

/// Issue the `state` parameter for a Kakao consent redirect.
pub fn generate_oauth_state(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = OAuthStateClaims {
        sub: user_id,
        purpose: OAUTH_STATE_PURPOSE.to_string(),
        exp: now + OAUTH_STATE_TTL_SECS,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify a `state` value and return the user id it was issued for.
///
/// Returns `None` for tampered, expired, or foreign tokens.
pub fn validate_oauth_state(state: &str, config: &JwtConfig) -> Option<DbId> {
    let data = decode::<OAuthStateClaims>(
        state,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;
    (data.claims.purpose == OAUTH_STATE_PURPOSE).then_some(data.claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_hours: 168,
        }
    }

    #[test]
    fn test_generate_and_validate_access_token() {
        let config = test_config();
        let token = generate_access_token(42, "상준", "admin", &config)
            .expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.username, "상준");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp - claims.iat, 168 * 3600);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();

        // Well beyond the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            username: "재천".to_string(),
            role: "worker".to_string(),
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = test_config();
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
            expiry_hours: 168,
        };

        let token = generate_access_token(1, "민기", "worker", &config_a)
            .expect("token generation should succeed");

        assert!(validate_token(&token, &config_b).is_err());
    }

    #[test]
    fn test_oauth_state_round_trip() {
        let config = test_config();
        let state = generate_oauth_state(7, &config).unwrap();
        assert_eq!(validate_oauth_state(&state, &config), Some(7));
        assert_eq!(validate_oauth_state("admin", &config), None);
    }

    #[test]
    fn test_access_token_is_not_a_valid_state() {
        let config = test_config();
        let token = generate_access_token(7, "상준", "admin", &config).unwrap();
        assert_eq!(validate_oauth_state(&token, &config), None);

        let state = generate_oauth_state(7, &config).unwrap();
        assert!(validate_token(&state, &config).is_err());
    }
}
