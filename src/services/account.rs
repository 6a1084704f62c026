// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account lifecycle: registration, email verification, login, profile
//! updates and administration.
//!
//! Every payload goes through [`crate::validation`] before it reaches the
//! store. Mail delivery failures are logged but never fail the operation
//! that triggered them.

use crate::config::Config;
use crate::db::UserStore;
use crate::error::{AppError, Result};
use crate::models::{TokenResponse, User, UserListResponse, UserResponse, UserRole};
use crate::services::mailer::{Email, Mailer};
use crate::services::password::{hash_password, random_token, verify_password};
use crate::services::token::TokenService;
use crate::validation::{generate_nickname, UserCreate, UserUpdate};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Largest page `list_users` will return.
pub const MAX_PAGE_SIZE: usize = 100;

pub struct AccountService {
    config: Config,
    store: Arc<dyn UserStore>,
    mailer: Arc<dyn Mailer>,
    tokens: Arc<TokenService>,
}

impl AccountService {
    pub fn new(
        config: Config,
        store: Arc<dyn UserStore>,
        mailer: Arc<dyn Mailer>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            config,
            store,
            mailer,
            tokens,
        }
    }

    pub fn tokens(&self) -> &Arc<TokenService> {
        &self.tokens
    }

    /// Create an account.
    ///
    /// The first account in an empty store becomes a verified admin. Everyone
    /// else starts as `ANONYMOUS` and is sent a verification link.
    pub async fn register(&self, input: UserCreate) -> Result<User> {
        let new_user = input.validate()?;

        if self
            .store
            .get_user_by_email(&new_user.email)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        let is_first_user = self.store.count_users().await? == 0;
        let (role, verification_token) = if is_first_user {
            (UserRole::Admin, None)
        } else {
            (UserRole::Anonymous, Some(random_token()?))
        };

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            nickname: new_user.nickname.unwrap_or_else(generate_nickname),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            bio: new_user.bio,
            profile_picture_url: new_user.profile_picture_url,
            linkedin_profile_url: new_user.linkedin_profile_url,
            github_profile_url: new_user.github_profile_url,
            role,
            is_professional: false,
            email_verified: is_first_user,
            verification_token,
            hashed_password: hash_password(&new_user.password)?,
            failed_login_attempts: 0,
            is_locked: false,
            created_at: now,
            updated_at: now,
        };

        let user = self.store.create_user(user).await?;
        tracing::info!(user_id = %user.id, role = %user.role, "User registered");

        if let Some(token) = &user.verification_token {
            let email = Email::verification(&self.config.server_base_url, &user, token);
            if let Err(e) = email.send(self.mailer.as_ref()).await {
                tracing::warn!(user_id = %user.id, error = %e, "Failed to send verification email");
            }
        }

        Ok(user)
    }

    /// Confirm an email address with the token from the verification link.
    pub async fn verify_email(&self, user_id: Uuid, token: &str) -> Result<User> {
        let mut user = self.require_user(user_id).await?;

        if user.verification_token.as_deref() != Some(token) {
            tracing::warn!(user_id = %user_id, "Invalid email verification token");
            return Err(AppError::BadRequest(
                "Invalid or expired verification token".to_string(),
            ));
        }

        user.email_verified = true;
        user.verification_token = None;
        if user.role == UserRole::Anonymous {
            user.role = UserRole::Authenticated;
        }
        user.updated_at = Utc::now();
        self.store.update_user(&user).await?;

        tracing::info!(user_id = %user.id, role = %user.role, "Email verified");
        Ok(user)
    }

    /// Check credentials and issue an access token.
    ///
    /// Unknown emails and wrong passwords fail identically. Repeated wrong
    /// passwords lock the account after `max_login_attempts`.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse> {
        let Some(mut user) = self.store.get_user_by_email(email.trim()).await? else {
            tracing::warn!("Login attempt for unknown email");
            return Err(AppError::InvalidCredentials);
        };

        if user.is_locked {
            tracing::warn!(user_id = %user.id, "Login attempt on locked account");
            return Err(AppError::Forbidden(
                "Account locked due to too many failed login attempts".to_string(),
            ));
        }

        if !verify_password(password, &user.hashed_password) {
            user.failed_login_attempts += 1;
            if user.failed_login_attempts >= self.config.max_login_attempts {
                user.is_locked = true;
                tracing::warn!(
                    user_id = %user.id,
                    attempts = user.failed_login_attempts,
                    "Account locked"
                );
            }
            user.updated_at = Utc::now();
            self.store.update_user(&user).await?;
            return Err(AppError::InvalidCredentials);
        }

        if !user.email_verified {
            return Err(AppError::Forbidden("Email not verified".to_string()));
        }

        if user.failed_login_attempts > 0 {
            user.failed_login_attempts = 0;
            user.updated_at = Utc::now();
            self.store.update_user(&user).await?;
        }

        let token = self.tokens.issue_for_user(&user)?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(TokenResponse::bearer(token))
    }

    /// Apply a validated profile update.
    pub async fn update_profile(&self, user_id: Uuid, input: UserUpdate) -> Result<User> {
        let changes = input.validate()?;
        let mut user = self.require_user(user_id).await?;

        changes.apply(&mut user);
        user.updated_at = Utc::now();
        self.store.update_user(&user).await?;

        tracing::info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<User> {
        self.require_user(user_id).await
    }

    /// One page of users. Pages start at 1; `size` is capped at [`MAX_PAGE_SIZE`].
    pub async fn list_users(&self, page: usize, size: usize) -> Result<UserListResponse> {
        if page == 0 || size == 0 {
            return Err(AppError::BadRequest(
                "page and size must be at least 1".to_string(),
            ));
        }
        let size = size.min(MAX_PAGE_SIZE);
        let skip = (page - 1).saturating_mul(size);

        let total = self.store.count_users().await?;
        let users = self.store.list_users(skip, size).await?;

        Ok(UserListResponse {
            items: users.iter().map(UserResponse::from).collect(),
            total,
            page,
            size,
        })
    }

    pub async fn delete_user(&self, user_id: Uuid) -> Result<()> {
        if !self.store.delete_user(user_id).await? {
            return Err(AppError::NotFound(format!("User {user_id} not found")));
        }
        tracing::info!(user_id = %user_id, "User deleted");
        Ok(())
    }

    async fn require_user(&self, user_id: Uuid) -> Result<User> {
        self.store
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
    }
}
