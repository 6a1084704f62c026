// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Validation of user-supplied account fields.
//!
//! Field validators are pure functions that either return the normalized
//! value or a [`ValidationError`] describing the first rule that failed.
//! [`user`] combines them into whole-payload checks for create and update.

pub mod nickname_gen;
pub mod rules;
pub mod user;

use serde::Serialize;
use std::fmt;

pub use nickname_gen::generate_nickname;
pub use rules::{validate_email, validate_nickname, validate_password, validate_url};
pub use user::{NewUser, ProfileChanges, UserCreate, UserUpdate};

/// Reason a single value or payload was rejected.
///
/// The display text is user-facing and ends up in 422 responses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid URL format. Please provide a valid URL with proper domain format.")]
    InvalidUrl,

    #[error("URL is too long. Please provide a URL under 2048 characters.")]
    UrlTooLong,

    #[error("Nickname must be at least 3 characters")]
    NicknameTooShort,

    #[error("Nickname cannot exceed 30 characters")]
    NicknameTooLong,

    #[error("Nickname can only contain alphanumeric characters, underscores, and hyphens")]
    NicknameInvalidCharacters,

    #[error("Nickname cannot contain consecutive special characters")]
    NicknameConsecutiveSpecial,

    #[error("Nickname must start and end with an alphanumeric character")]
    NicknameBoundary,

    #[error("This nickname is reserved and cannot be used")]
    NicknameReserved,

    #[error("Password is required")]
    PasswordRequired,

    #[error("Password must be at least 8 characters")]
    PasswordTooShort,

    #[error("Password cannot exceed 128 characters")]
    PasswordTooLong,

    #[error("Password must contain at least one uppercase letter")]
    PasswordMissingUppercase,

    #[error("Password must contain at least one lowercase letter")]
    PasswordMissingLowercase,

    #[error("Password must contain at least one digit")]
    PasswordMissingDigit,

    #[error("Password must contain at least one special character")]
    PasswordMissingSpecial,

    #[error("This password is too common and easily guessable")]
    PasswordTooCommon,

    #[error("Password contains too many sequential characters that make it vulnerable")]
    PasswordSequential,

    #[error("Email is required")]
    EmailRequired,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("At least one field must be provided for update with a non-empty value")]
    NoUpdateFields,

    #[error("Bio cannot exceed 500 characters")]
    BioTooLong,
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Per-field failures collected over a whole payload, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, error: ValidationError) {
        self.0.push(FieldError {
            field,
            message: error.to_string(),
        });
    }

    /// Record the error, if any, and hand back the success value.
    pub fn check<T>(&mut self, field: &'static str, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(field, err);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Message reported for `field`, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Rejection of a profile update.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpdateError {
    /// Whole-payload rule failed (nothing to change, bio too long).
    #[error("{0}")]
    Rejected(ValidationError),

    #[error("{0}")]
    Fields(FieldErrors),
}

impl From<FieldErrors> for UpdateError {
    fn from(errors: FieldErrors) -> Self {
        UpdateError::Fields(errors)
    }
}
