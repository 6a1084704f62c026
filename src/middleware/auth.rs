// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT authentication middleware.

use crate::error::AppError;
use crate::models::UserRole;
use crate::services::token::{Claims, TokenService};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use uuid::Uuid;

/// Cookie checked before the `Authorization` header.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Authenticated user extracted from JWT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl AuthUser {
    /// Read `sub` (user id) and `role` from verified claims.
    pub fn from_claims(claims: &Claims) -> Option<Self> {
        let user_id = claims.get("sub")?.as_str()?.parse().ok()?;
        let role = UserRole::parse(claims.get("role")?.as_str()?)?;
        Some(Self { user_id, role })
    }
}

/// Middleware that requires valid JWT authentication.
pub async fn require_auth(
    State(tokens): State<Arc<TokenService>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Try cookie first, then header
    let token = if let Some(cookie) = jar.get(ACCESS_TOKEN_COOKIE) {
        cookie.value().to_string()
    } else {
        let auth_header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
            Some(t) if !t.trim().is_empty() => t.trim().to_string(),
            _ => return Err(AppError::Unauthorized),
        }
    };

    let claims = tokens.decode_token(&token).ok_or(AppError::InvalidToken)?;
    let auth_user = AuthUser::from_claims(&claims).ok_or(AppError::InvalidToken)?;

    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}
