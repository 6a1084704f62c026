//! User model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Account role. Variants are declared in ascending order of privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Anonymous,
    Authenticated,
    Manager,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Anonymous => "ANONYMOUS",
            UserRole::Authenticated => "AUTHENTICATED",
            UserRole::Manager => "MANAGER",
            UserRole::Admin => "ADMIN",
        }
    }

    /// Parse the wire form used in token claims.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ANONYMOUS" => Some(UserRole::Anonymous),
            "AUTHENTICATED" => Some(UserRole::Authenticated),
            "MANAGER" => Some(UserRole::Manager),
            "ADMIN" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub nickname: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub linkedin_profile_url: Option<String>,
    pub github_profile_url: Option<String>,
    pub role: UserRole,
    pub is_professional: bool,
    pub email_verified: bool,
    /// Outstanding email verification token, cleared once used
    pub verification_token: Option<String>,
    /// PBKDF2 hash, see [`crate::services::password`]. Never exposed via [`UserResponse`].
    pub hashed_password: String,
    pub failed_login_attempts: u32,
    pub is_locked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub nickname: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub linkedin_profile_url: Option<String>,
    pub github_profile_url: Option<String>,
    pub role: UserRole,
    pub is_professional: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            nickname: user.nickname.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            bio: user.bio.clone(),
            profile_picture_url: user.profile_picture_url.clone(),
            linkedin_profile_url: user.linkedin_profile_url.clone(),
            github_profile_url: user.github_profile_url.clone(),
            role: user.role,
            is_professional: user.is_professional,
        }
    }
}

/// One page of users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListResponse {
    pub items: Vec<UserResponse>,
    pub total: usize,
    pub page: usize,
    pub size: usize,
}

/// Result of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}
