// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password hashing (PBKDF2-HMAC-SHA256) and random account secrets.
//!
//! Hashes are stored as `pbkdf2-sha256$<iterations>$<salt>$<hash>` with
//! unpadded standard base64, so the iteration count can be raised later
//! without invalidating existing hashes.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use ring::rand::{SecureRandom, SystemRandom};
use ring::{digest, pbkdf2};
use std::num::NonZeroU32;

const SCHEME: &str = "pbkdf2-sha256";
const ITERATIONS: NonZeroU32 = match NonZeroU32::new(100_000) {
    Some(n) => n,
    None => panic!("PBKDF2 iteration count must be non-zero"),
};
const SALT_LEN: usize = 16;
const HASH_LEN: usize = digest::SHA256_OUTPUT_LEN;
const TOKEN_LEN: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum PasswordHashError {
    #[error("System random number generator failed")]
    Rng,
}

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| PasswordHashError::Rng)?;

    let mut hash = [0u8; HASH_LEN];
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        ITERATIONS,
        &salt,
        password.as_bytes(),
        &mut hash,
    );

    Ok(format!(
        "{SCHEME}${}${}${}",
        ITERATIONS,
        STANDARD_NO_PAD.encode(salt),
        STANDARD_NO_PAD.encode(hash)
    ))
}

/// Check a password against a stored hash. Unparseable hashes never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(SCHEME), Some(iterations), Some(salt), Some(hash), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };

    let Ok(iterations) = iterations.parse::<NonZeroU32>() else {
        return false;
    };
    let (Ok(salt), Ok(hash)) = (STANDARD_NO_PAD.decode(salt), STANDARD_NO_PAD.decode(hash)) else {
        return false;
    };

    pbkdf2::verify(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        &salt,
        password.as_bytes(),
        &hash,
    )
    .is_ok()
}

/// Random URL-safe secret, used for email verification links.
pub fn random_token() -> Result<String, PasswordHashError> {
    let mut bytes = [0u8; TOKEN_LEN];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| PasswordHashError::Rng)?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("StrongPassword123!").unwrap();

        assert!(hash.starts_with("pbkdf2-sha256$100000$"));
        assert!(verify_password("StrongPassword123!", &hash));
        assert!(!verify_password("StrongPassword123?", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let hash1 = hash_password("StrongPassword123!").unwrap();
        let hash2 = hash_password("StrongPassword123!").unwrap();

        assert_ne!(hash1, hash2);
        assert!(verify_password("StrongPassword123!", &hash1));
        assert!(verify_password("StrongPassword123!", &hash2));
    }

    #[test]
    fn test_verify_invalid_hash() {
        assert!(!verify_password("password", ""));
        assert!(!verify_password("password", "invalid_hash_format"));
        assert!(!verify_password("password", "bcrypt$10$abc$def"));
        assert!(!verify_password("password", "pbkdf2-sha256$0$abc$def"));
        assert!(!verify_password("password", "pbkdf2-sha256$1000$!!!$def"));
        assert!(!verify_password("password", "pbkdf2-sha256$1000$abc$def$extra"));
    }

    #[test]
    fn test_random_token_is_url_safe() {
        let token = random_token().unwrap();
        assert_eq!(token.len(), 43);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_ne!(token, random_token().unwrap());
    }
}
