// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Outgoing email.
//!
//! Transport is pluggable; this crate only composes messages and hands them
//! to a [`Mailer`].

use crate::models::User;
use async_trait::async_trait;
use html_escape::{encode_double_quoted_attribute, encode_text};

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Mail delivery failed: {0}")]
    Delivery(String),
}

/// Delivers a rendered message to one recipient.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_email(&self, subject: &str, html_body: &str, recipient: &str)
        -> Result<(), MailError>;
}

/// Mailer that only logs messages. Useful for local development.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_email(
        &self,
        subject: &str,
        html_body: &str,
        recipient: &str,
    ) -> Result<(), MailError> {
        tracing::info!(
            recipient,
            subject,
            body_len = html_body.len(),
            "Email not sent (log mailer)"
        );
        Ok(())
    }
}

/// A composed message, ready for a [`Mailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub subject: String,
    pub html_body: String,
    pub recipient: String,
}

impl Email {
    /// Account verification message with a one-time link.
    pub fn verification(base_url: &str, user: &User, token: &str) -> Self {
        let link = format!(
            "{}/verify-email/{}/{}",
            base_url.trim_end_matches('/'),
            user.id,
            token
        );
        // Names are free text from the registrant.
        let name = encode_text(user.first_name.as_deref().unwrap_or(&user.nickname));
        let href = encode_double_quoted_attribute(&link);
        let text = encode_text(&link);

        Self {
            subject: "Verify Your Account".to_string(),
            html_body: format!(
                "<p>Hi {name},</p>\
                 <p>Please confirm your email address by visiting the link below.</p>\
                 <p><a href=\"{href}\">{text}</a></p>"
            ),
            recipient: user.email.clone(),
        }
    }

    pub async fn send(&self, mailer: &dyn Mailer) -> Result<(), MailError> {
        mailer
            .send_email(&self.subject, &self.html_body, &self.recipient)
            .await
    }
}
