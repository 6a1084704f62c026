// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! User accounts core: registration and profile validation, JWT access
//! tokens, and the account lifecycle built on top of them.
//!
//! Persistence and mail delivery are reached through the [`db::UserStore`]
//! and [`services::Mailer`] traits so callers can plug in their own backends.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod services;
pub mod validation;

pub use config::Config;
pub use error::AppError;
pub use models::{User, UserRole};
pub use services::{AccountService, TokenService};
