// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Whole-payload validation for account creation and profile updates.

use super::rules::{validate_email, validate_nickname, validate_password, validate_url};
use super::{FieldErrors, UpdateError, ValidationError};
use crate::models::User;
use serde::Deserialize;

pub const BIO_MAX_LENGTH: usize = 500;

/// Registration payload as received from a client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserCreate {
    pub email: Option<String>,
    pub password: Option<String>,
    pub nickname: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub linkedin_profile_url: Option<String>,
    pub github_profile_url: Option<String>,
}

/// Registration data that passed every field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    /// `None` when the client did not pick one
    pub nickname: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub linkedin_profile_url: Option<String>,
    pub github_profile_url: Option<String>,
}

impl UserCreate {
    /// Run every field rule and report all failing fields.
    pub fn validate(self) -> Result<NewUser, FieldErrors> {
        let mut errors = FieldErrors::new();

        let email = errors.check(
            "email",
            validate_email(self.email.as_deref().unwrap_or_default()),
        );
        let password = errors.check(
            "password",
            validate_password(self.password.as_deref().unwrap_or_default()),
        );
        let nickname = errors.check("nickname", validate_nickname(self.nickname.as_deref()));
        let profile_picture_url = errors.check(
            "profile_picture_url",
            validate_url(self.profile_picture_url.as_deref()),
        );
        let linkedin_profile_url = errors.check(
            "linkedin_profile_url",
            validate_url(self.linkedin_profile_url.as_deref()),
        );
        let github_profile_url = errors.check(
            "github_profile_url",
            validate_url(self.github_profile_url.as_deref()),
        );

        match (
            email,
            password,
            nickname,
            profile_picture_url,
            linkedin_profile_url,
            github_profile_url,
        ) {
            (
                Some(email),
                Some(password),
                Some(nickname),
                Some(profile_picture_url),
                Some(linkedin_profile_url),
                Some(github_profile_url),
            ) if errors.is_empty() => Ok(NewUser {
                email,
                password,
                nickname,
                first_name: non_blank(self.first_name),
                last_name: non_blank(self.last_name),
                bio: non_blank(self.bio),
                profile_picture_url,
                linkedin_profile_url,
                github_profile_url,
            }),
            _ => Err(errors),
        }
    }
}

/// Profile update payload. Missing fields, and blank free-text or URL
/// fields, mean "leave unchanged". A blank email or nickname is rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub nickname: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub linkedin_profile_url: Option<String>,
    pub github_profile_url: Option<String>,
}

/// Validated update. Each `Some` field replaces the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub email: Option<String>,
    pub nickname: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub linkedin_profile_url: Option<String>,
    pub github_profile_url: Option<String>,
}

impl UserUpdate {
    fn fields(&self) -> [(&'static str, Option<&str>); 8] {
        [
            ("email", self.email.as_deref()),
            ("nickname", self.nickname.as_deref()),
            ("first_name", self.first_name.as_deref()),
            ("last_name", self.last_name.as_deref()),
            ("bio", self.bio.as_deref()),
            ("profile_picture_url", self.profile_picture_url.as_deref()),
            ("linkedin_profile_url", self.linkedin_profile_url.as_deref()),
            ("github_profile_url", self.github_profile_url.as_deref()),
        ]
    }

    /// Whole-payload rules: something must change, and the bio has a cap.
    pub fn check_at_least_one_value(&self) -> Result<(), ValidationError> {
        let provided: Vec<(&str, &str)> = self
            .fields()
            .into_iter()
            .filter_map(|(name, value)| value.filter(|v| !v.trim().is_empty()).map(|v| (name, v)))
            .collect();

        if provided.is_empty() {
            return Err(ValidationError::NoUpdateFields);
        }

        let bio_too_long = provided
            .iter()
            .any(|(name, value)| *name == "bio" && value.chars().count() > BIO_MAX_LENGTH);
        if bio_too_long {
            return Err(ValidationError::BioTooLong);
        }

        Ok(())
    }

    /// Payload rules first, then every provided field's own rule.
    pub fn validate(self) -> Result<ProfileChanges, UpdateError> {
        self.check_at_least_one_value()
            .map_err(UpdateError::Rejected)?;

        let mut errors = FieldErrors::new();

        // Provided values are checked as sent, blank or not.
        let email = match self.email {
            Some(email) => errors.check("email", validate_email(&email)),
            None => None,
        };
        let nickname = errors
            .check("nickname", validate_nickname(self.nickname.as_deref()))
            .flatten();
        let profile_picture_url = errors
            .check(
                "profile_picture_url",
                validate_url(self.profile_picture_url.as_deref()),
            )
            .flatten();
        let linkedin_profile_url = errors
            .check(
                "linkedin_profile_url",
                validate_url(self.linkedin_profile_url.as_deref()),
            )
            .flatten();
        let github_profile_url = errors
            .check(
                "github_profile_url",
                validate_url(self.github_profile_url.as_deref()),
            )
            .flatten();

        errors.into_result()?;

        Ok(ProfileChanges {
            email,
            nickname,
            first_name: non_blank(self.first_name),
            last_name: non_blank(self.last_name),
            bio: non_blank(self.bio),
            profile_picture_url,
            linkedin_profile_url,
            github_profile_url,
        })
    }
}

impl ProfileChanges {
    /// Overwrite the fields this update carries.
    pub fn apply(self, user: &mut User) {
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(nickname) = self.nickname {
            user.nickname = nickname;
        }
        if self.first_name.is_some() {
            user.first_name = self.first_name;
        }
        if self.last_name.is_some() {
            user.last_name = self.last_name;
        }
        if self.bio.is_some() {
            user.bio = self.bio;
        }
        if self.profile_picture_url.is_some() {
            user.profile_picture_url = self.profile_picture_url;
        }
        if self.linkedin_profile_url.is_some() {
            user.linkedin_profile_url = self.linkedin_profile_url;
        }
        if self.github_profile_url.is_some() {
            user.github_profile_url = self.github_profile_url;
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
