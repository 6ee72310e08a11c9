//! Stateless session tokens.
//!
//! A login issues one HS256 access token. Its [`Claims`] carry the user's
//! role names and staff flag as they were at login, so the access policy can
//! be evaluated without touching the database. Role changes take effect on
//! the next login.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use merch_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DEFAULT_TOKEN_TTL_MINS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: DbId,
    pub roles: Vec<String>,
    /// Tokens minted before the flag existed decode as non-staff.
    #[serde(default)]
    pub is_staff: bool,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl Claims {
    fn issue(user_id: DbId, roles: &[String], is_staff: bool, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            roles: roles.to_vec(),
            is_staff,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
}

impl JwtConfig {
    /// Read `JWT_SECRET` (required) and `JWT_ACCESS_EXPIRY_MINS` (default 60).
    ///
    /// # Panics
    ///
    /// Panics when the secret is missing or blank, or the expiry is not a
    /// positive number of minutes.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .expect("JWT_SECRET must be set to a non-empty value");

        let access_token_expiry_mins = match std::env::var("JWT_ACCESS_EXPIRY_MINS") {
            Ok(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|mins| *mins > 0)
                .expect("JWT_ACCESS_EXPIRY_MINS must be a positive integer"),
            Err(_) => DEFAULT_TOKEN_TTL_MINS,
        };

        Self {
            secret,
            access_token_expiry_mins,
        }
    }

    fn ttl(&self) -> Duration {
        Duration::minutes(self.access_token_expiry_mins)
    }

    /// Token lifetime as reported to clients.
    pub fn expires_in_secs(&self) -> i64 {
        self.ttl().num_seconds()
    }

    /// `sub` is numeric, which the registered-claim check would reject, so
    /// only `exp` is required there. A missing `sub` still fails to decode.
    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        validation
    }
}

/// Sign a token for `user_id` holding `roles`.
pub fn generate_access_token(
    user_id: DbId,
    roles: &[String],
    is_staff: bool,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims::issue(user_id, roles, is_staff, config.ttl());
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature and expiry and return the claims.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &JwtConfig::validation(),
    )
    .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::errors::ErrorKind;

    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            access_token_expiry_mins: 60,
        }
    }

    fn sign(value: &serde_json::Value, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            value,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn issued_token_carries_roles_and_staff_flag() {
        let cfg = config("merch-secret");
        let roles = vec!["brand_user".to_string(), "merch_ops".to_string()];

        let token = generate_access_token(42, &roles, true, &cfg).unwrap();
        let claims = validate_token(&token, &cfg).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.roles, roles);
        assert!(claims.is_staff);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn expires_in_matches_configured_minutes() {
        let mut cfg = config("merch-secret");
        cfg.access_token_expiry_mins = 15;
        assert_eq!(cfg.expires_in_secs(), 900);
    }

    #[test]
    fn expired_token_rejected() {
        let now = Utc::now().timestamp();
        let token = sign(
            &serde_json::json!({"sub": 1, "roles": [], "exp": now - 600, "iat": now - 1200, "jti": "x"}),
            "merch-secret",
        );
        assert!(validate_token(&token, &config("merch-secret")).is_err());
    }

    #[test]
    fn foreign_signature_rejected() {
        let token = generate_access_token(1, &[], false, &config("one-secret")).unwrap();
        assert!(validate_token(&token, &config("another-secret")).is_err());
    }

    #[test]
    fn missing_staff_claim_defaults_to_false() {
        let exp = Utc::now().timestamp() + 600;
        let token = sign(
            &serde_json::json!({"sub": 9, "roles": ["merch_ops"], "exp": exp, "iat": 0, "jti": "x"}),
            "merch-secret",
        );
        let claims = validate_token(&token, &config("merch-secret")).unwrap();
        assert!(!claims.is_staff);
        assert_eq!(claims.roles, vec!["merch_ops".to_string()]);
    }

    #[test]
    fn token_without_subject_rejected() {
        let exp = Utc::now().timestamp() + 600;
        let token = sign(
            &serde_json::json!({"roles": [], "exp": exp, "iat": 0, "jti": "x"}),
            "merch-secret",
        );
        let err = validate_token(&token, &config("merch-secret")).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Json(_)), "unexpected error: {err:?}");
    }

    #[test]
    fn numeric_subject_accepted() {
        let cfg = config("merch-secret");
        let token = generate_access_token(7, &["brand_user".to_string()], false, &cfg).unwrap();
        let claims = validate_token(&token, &cfg).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.roles, vec!["brand_user".to_string()]);
    }
}
