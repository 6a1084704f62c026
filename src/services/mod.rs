// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod account;
pub mod mailer;
pub mod password;
pub mod token;

pub use account::AccountService;
pub use mailer::{Email, LogMailer, MailError, Mailer};
pub use token::{Claims, TokenConfig, TokenError, TokenService};
