// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory [`UserStore`] backed by `DashMap`.

use super::{StoreError, UserStore};
use crate::models::User;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: DashMap<Uuid, User>,
    /// Lowercased email -> user id
    emails: DashMap<String, Uuid>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_user(&self, user: User) -> Result<User, StoreError> {
        // The email index entry is the uniqueness lock.
        match self.emails.entry(email_key(&user.email)) {
            Entry::Occupied(_) => Err(StoreError::EmailTaken(user.email)),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
                self.users.insert(user.id, user.clone());
                Ok(user)
            }
        }
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let Some(id) = self.emails.get(&email_key(email)).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn update_user(&self, user: &User) -> Result<(), StoreError> {
        let old_email = self
            .users
            .get(&user.id)
            .map(|u| u.email.clone())
            .ok_or(StoreError::NotFound(user.id))?;

        let old_key = email_key(&old_email);
        let new_key = email_key(&user.email);
        if old_key != new_key {
            match self.emails.entry(new_key) {
                Entry::Occupied(_) => return Err(StoreError::EmailTaken(user.email.clone())),
                Entry::Vacant(slot) => {
                    slot.insert(user.id);
                }
            }
            self.emails.remove(&old_key);
        }

        self.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError> {
        match self.users.remove(&id) {
            Some((_, user)) => {
                self.emails.remove(&email_key(&user.email));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_users(&self, skip: usize, limit: usize) -> Result<Vec<User>, StoreError> {
        let mut users: Vec<User> = self.users.iter().map(|u| u.value().clone()).collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(users.into_iter().skip(skip).take(limit).collect())
    }

    async fn count_users(&self) -> Result<usize, StoreError> {
        Ok(self.users.len())
    }
}
