// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT access token issuance and verification.
//!
//! Tokens are never stored. A token is valid exactly when its HMAC signature
//! checks out under the configured secret and its `exp` has not passed.

use crate::models::User;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};
use std::fmt;

/// Token payload. `sub` and `role` are expected; anything else passes through.
pub type Claims = Map<String, Value>;

/// Signing configuration, fixed for the lifetime of a [`TokenService`].
#[derive(Clone)]
pub struct TokenConfig {
    pub secret: Vec<u8>,
    pub algorithm: Algorithm,
    /// Lifetime used when the caller does not pass one
    pub default_ttl: Duration,
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

/// Token issuance and configuration errors. Decoding never errors.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Unsupported signing algorithm: {0:?}")]
    UnsupportedAlgorithm(Algorithm),

    #[error("JWT signing secret is empty")]
    EmptySecret,

    #[error("Token lifetime out of range")]
    TtlOutOfRange,

    #[error("Failed to encode token: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
}

/// Stateless JWT encoder/decoder.
#[derive(Clone)]
pub struct TokenService {
    algorithm: Algorithm,
    default_ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.algorithm)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(config: TokenConfig) -> Result<Self, TokenError> {
        if !matches!(
            config.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(TokenError::UnsupportedAlgorithm(config.algorithm));
        }
        if config.secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        let mut validation = Validation::new(config.algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            algorithm: config.algorithm,
            default_ttl: config.default_ttl,
            encoding_key: EncodingKey::from_secret(&config.secret),
            decoding_key: DecodingKey::from_secret(&config.secret),
            validation,
        })
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Sign `claims` with `exp = now + ttl`, overwriting any `exp` passed in.
    ///
    /// A negative `ttl` yields an already-expired token.
    pub fn create_access_token(
        &self,
        claims: &Claims,
        ttl: Option<Duration>,
    ) -> Result<String, TokenError> {
        let expires_at = Utc::now()
            .checked_add_signed(ttl.unwrap_or(self.default_ttl))
            .ok_or(TokenError::TtlOutOfRange)?;

        let mut payload = claims.clone();
        payload.insert("exp".to_string(), Value::from(expires_at.timestamp()));

        Ok(encode(
            &Header::new(self.algorithm),
            &payload,
            &self.encoding_key,
        )?)
    }

    /// Verify a token and return its claims.
    ///
    /// Malformed, forged and expired tokens all yield `None`; the reason is
    /// only logged. A token is expired from the second named by `exp` on.
    pub fn decode_token(&self, token: &str) -> Option<Claims> {
        let claims = match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data.claims,
            Err(err) => {
                tracing::debug!(reason = ?err.kind(), "Rejected access token");
                return None;
            }
        };

        // jsonwebtoken only rejects `exp < now`.
        let exp = claims.get("exp").and_then(Value::as_i64)?;
        if exp <= Utc::now().timestamp() {
            tracing::debug!(exp, "Rejected access token at expiry");
            return None;
        }

        Some(claims)
    }

    /// Issue a default-lifetime token carrying the user's id and role.
    pub fn issue_for_user(&self, user: &User) -> Result<String, TokenError> {
        let mut claims = Claims::new();
        claims.insert("sub".to_string(), Value::from(user.id.to_string()));
        claims.insert("role".to_string(), Value::from(user.role.as_str()));
        self.create_access_token(&claims, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(algorithm: Algorithm) -> TokenConfig {
        TokenConfig {
            secret: b"unit_test_secret".to_vec(),
            algorithm,
            default_ttl: Duration::minutes(15),
        }
    }

    #[test]
    fn test_rejects_non_hmac_algorithms() {
        for algorithm in [Algorithm::RS256, Algorithm::ES256, Algorithm::EdDSA] {
            assert!(matches!(
                TokenService::new(config(algorithm)),
                Err(TokenError::UnsupportedAlgorithm(_))
            ));
        }
    }

    #[test]
    fn test_rejects_empty_secret() {
        let mut cfg = config(Algorithm::HS256);
        cfg.secret.clear();
        assert!(matches!(TokenService::new(cfg), Err(TokenError::EmptySecret)));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", config(Algorithm::HS256));
        assert!(!rendered.contains("unit_test_secret"));
    }

    #[test]
    fn test_exp_is_overwritten() {
        let service = TokenService::new(config(Algorithm::HS384)).unwrap();
        let mut claims = Claims::new();
        claims.insert("sub".into(), "abc".into());
        claims.insert("exp".into(), Value::from(1));

        let token = service
            .create_access_token(&claims, Some(Duration::minutes(1)))
            .unwrap();
        let decoded = service.decode_token(&token).expect("token should be valid");
        assert!(decoded["exp"].as_i64().unwrap() > Utc::now().timestamp());
    }
}
