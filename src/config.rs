//! Application configuration loaded from environment variables.
//!
//! Loaded once at startup and treated as read-only afterwards. The token
//! settings are handed to [`crate::TokenService`] as an explicit
//! [`TokenConfig`] rather than read from globals.

use crate::services::token::TokenConfig;
use jsonwebtoken::Algorithm;
use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Base URL used to build links in outgoing email
    pub server_base_url: String,
    /// JWT signing algorithm (HMAC family only)
    pub jwt_algorithm: Algorithm,
    /// Default access token lifetime in minutes
    pub access_token_expire_minutes: i64,
    /// Failed logins before an account is locked
    pub max_login_attempts: u32,

    // --- Secrets ---
    /// JWT signing key (raw bytes)
    pub jwt_secret_key: Vec<u8>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            server_base_url: "http://localhost:8000".to_string(),
            jwt_algorithm: Algorithm::HS256,
            access_token_expire_minutes: 15,
            max_login_attempts: 5,
            jwt_secret_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            server_base_url: env::var("SERVER_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            jwt_algorithm: parse_algorithm(
                &env::var("JWT_ALGORITHM").unwrap_or_else(|_| "HS256".to_string()),
            )?,
            access_token_expire_minutes: parse_positive("ACCESS_TOKEN_EXPIRE_MINUTES", 15)?,
            max_login_attempts: parse_positive("MAX_LOGIN_ATTEMPTS", 5)?,

            jwt_secret_key: env::var("JWT_SECRET_KEY")
                .map(|v| v.trim().to_string())
                .ok()
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing("JWT_SECRET_KEY"))?
                .into_bytes(),
        })
    }

    /// Token settings for [`crate::TokenService`].
    pub fn token_config(&self) -> TokenConfig {
        TokenConfig {
            secret: self.jwt_secret_key.clone(),
            algorithm: self.jwt_algorithm,
            default_ttl: chrono::Duration::minutes(self.access_token_expire_minutes),
        }
    }
}

/// Only HMAC algorithms are accepted; the secret is a shared key.
fn parse_algorithm(value: &str) -> Result<Algorithm, ConfigError> {
    match value.trim().to_ascii_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(ConfigError::Invalid {
            name: "JWT_ALGORITHM",
            value: other.to_string(),
        }),
    }
}

fn parse_positive<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(v) if v > T::default() => Ok(v),
            _ => Err(ConfigError::Invalid { name, value: raw }),
        },
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global; keep everything that touches them in one test.
    #[test]
    fn test_config_from_env() {
        env::set_var("JWT_SECRET_KEY", "test_jwt_key_32_bytes_minimum!!");
        env::remove_var("JWT_ALGORITHM");
        env::remove_var("ACCESS_TOKEN_EXPIRE_MINUTES");
        env::remove_var("MAX_LOGIN_ATTEMPTS");

        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.jwt_secret_key, b"test_jwt_key_32_bytes_minimum!!");
        assert_eq!(config.jwt_algorithm, Algorithm::HS256);
        assert_eq!(config.access_token_expire_minutes, 15);
        assert_eq!(config.max_login_attempts, 5);

        env::set_var("JWT_ALGORITHM", "hs512");
        env::set_var("ACCESS_TOKEN_EXPIRE_MINUTES", "30");
        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.jwt_algorithm, Algorithm::HS512);
        assert_eq!(config.token_config().default_ttl, chrono::Duration::minutes(30));

        env::set_var("JWT_ALGORITHM", "RS256");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid { name: "JWT_ALGORITHM", .. })
        ));
        env::remove_var("JWT_ALGORITHM");

        env::set_var("ACCESS_TOKEN_EXPIRE_MINUTES", "0");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid { name: "ACCESS_TOKEN_EXPIRE_MINUTES", .. })
        ));
        env::remove_var("ACCESS_TOKEN_EXPIRE_MINUTES");
    }

    #[test]
    fn test_parse_algorithm_rejects_asymmetric() {
        assert_eq!(parse_algorithm(" HS384 ").unwrap(), Algorithm::HS384);
        assert!(parse_algorithm("ES256").is_err());
        assert!(parse_algorithm("").is_err());
    }
}
