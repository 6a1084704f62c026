//! Persistence layer.
//!
//! Account logic talks to storage only through [`UserStore`]. The crate ships
//! an in-memory implementation; production deployments provide their own.

pub mod memory;

pub use memory::InMemoryUserStore;

use crate::models::User;
use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// User persistence. Email addresses are unique, compared case-insensitively.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user. Fails with [`StoreError::EmailTaken`] on a duplicate email.
    async fn create_user(&self, user: User) -> Result<User, StoreError>;

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Replace a stored user, keeping the email index in sync.
    async fn update_user(&self, user: &User) -> Result<(), StoreError>;

    /// Returns whether a user was removed.
    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Users ordered by creation time.
    async fn list_users(&self, skip: usize, limit: usize) -> Result<Vec<User>, StoreError>;

    async fn count_users(&self) -> Result<usize, StoreError>;
}
