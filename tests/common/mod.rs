// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use user_accounts::config::Config;
use user_accounts::db::InMemoryUserStore;
use user_accounts::services::{Email, MailError, Mailer};
use user_accounts::validation::UserCreate;
use user_accounts::{AccountService, TokenService, User};

pub const STRONG_PASSWORD: &str = "StrongPassword123!";

/// Mailer that keeps every message for inspection.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<Email>>,
}

#[allow(dead_code)]
impl RecordingMailer {
    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_email(
        &self,
        subject: &str,
        html_body: &str,
        recipient: &str,
    ) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(Email {
            subject: subject.to_string(),
            html_body: html_body.to_string(),
            recipient: recipient.to_string(),
        });
        Ok(())
    }
}

/// Mailer whose transport is always down.
#[allow(dead_code)]
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send_email(&self, _: &str, _: &str, _: &str) -> Result<(), MailError> {
        Err(MailError::Delivery("SMTP Error".to_string()))
    }
}

#[allow(dead_code)]
pub fn test_tokens() -> Arc<TokenService> {
    Arc::new(TokenService::new(Config::default().token_config()).expect("valid token config"))
}

/// Account service over an empty in-memory store.
#[allow(dead_code)]
pub fn test_accounts() -> (AccountService, Arc<InMemoryUserStore>, Arc<RecordingMailer>) {
    let store = Arc::new(InMemoryUserStore::new());
    let mailer = Arc::new(RecordingMailer::default());
    let service = AccountService::new(
        Config::default(),
        store.clone(),
        mailer.clone(),
        test_tokens(),
    );
    (service, store, mailer)
}

#[allow(dead_code)]
pub fn signup(email: &str) -> UserCreate {
    UserCreate {
        email: Some(email.to_string()),
        password: Some(STRONG_PASSWORD.to_string()),
        ..Default::default()
    }
}

/// Register an admin first so later registrations take the normal path.
#[allow(dead_code)]
pub async fn seed_admin(service: &AccountService) -> User {
    service
        .register(signup("admin@example.com"))
        .await
        .expect("admin registration")
}
