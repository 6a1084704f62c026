// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer/cookie authentication middleware tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware,
    routing::get,
    Extension, Router,
};
use chrono::Duration;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use user_accounts::middleware::auth::{require_auth, AuthUser, ACCESS_TOKEN_COOKIE};
use user_accounts::services::{Claims, TokenService};
use user_accounts::UserRole;
use uuid::Uuid;

mod common;

async fn whoami(Extension(user): Extension<AuthUser>) -> String {
    format!("{} {}", user.user_id, user.role)
}

fn app(tokens: Arc<TokenService>) -> Router {
    Router::new()
        .route("/me", get(whoami))
        .route_layer(middleware::from_fn_with_state(tokens, require_auth))
}

fn token_for(tokens: &TokenService, sub: &str, role: &str, ttl: Option<Duration>) -> String {
    let mut claims = Claims::new();
    claims.insert("sub".into(), Value::from(sub));
    claims.insert("role".into(), Value::from(role));
    tokens.create_access_token(&claims, ttl).unwrap()
}

async fn get_me(tokens: Arc<TokenService>, request: Request<Body>) -> (StatusCode, String) {
    let response = app(tokens).oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_bearer_header_accepted() {
    let tokens = common::test_tokens();
    let user_id = Uuid::new_v4();
    let token = token_for(&tokens, &user_id.to_string(), "MANAGER", None);

    let (status, body) = get_me(
        tokens,
        Request::builder()
            .uri("/me")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, format!("{} {}", user_id, UserRole::Manager));
}

#[tokio::test]
async fn test_cookie_accepted() {
    let tokens = common::test_tokens();
    let user_id = Uuid::new_v4();
    let token = token_for(&tokens, &user_id.to_string(), "AUTHENTICATED", None);

    let (status, body) = get_me(
        tokens,
        Request::builder()
            .uri("/me")
            .header(header::COOKIE, format!("{}={}", ACCESS_TOKEN_COOKIE, token))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.ends_with("AUTHENTICATED"));
}

#[tokio::test]
async fn test_missing_token_rejected() {
    let tokens = common::test_tokens();

    for auth in [None, Some("Basic dXNlcjpwYXNz"), Some("Bearer "), Some("Bearer")] {
        let mut builder = Request::builder().uri("/me");
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let (status, body) = get_me(tokens.clone(), builder.body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED, "{auth:?}");
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "unauthorized");
    }
}

#[tokio::test]
async fn test_rejected_tokens() {
    let tokens = common::test_tokens();
    let other_key = Arc::new(
        TokenService::new(user_accounts::services::TokenConfig {
            secret: b"some_other_key".to_vec(),
            algorithm: jsonwebtoken::Algorithm::HS256,
            default_ttl: Duration::minutes(15),
        })
        .unwrap(),
    );
    let user_id = Uuid::new_v4().to_string();

    let cases = [
        (
            "expired",
            token_for(&tokens, &user_id, "ADMIN", Some(Duration::seconds(-1))),
        ),
        ("forged", token_for(&other_key, &user_id, "ADMIN", None)),
        ("malformed", "not.a.valid.token".to_string()),
        ("sub not a uuid", token_for(&tokens, "someone@example.com", "ADMIN", None)),
        ("unknown role", token_for(&tokens, &user_id, "SUPERUSER", None)),
    ];

    for (name, token) in cases {
        let (status, body) = get_me(
            tokens.clone(),
            Request::builder()
                .uri("/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED, "{name}");
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "invalid_token", "{name}");
    }
}

#[test]
fn test_auth_user_from_claims() {
    let user_id = Uuid::new_v4();
    let mut claims = Claims::new();
    claims.insert("sub".into(), Value::from(user_id.to_string()));
    claims.insert("role".into(), Value::from("ADMIN"));

    assert_eq!(
        AuthUser::from_claims(&claims),
        Some(AuthUser {
            user_id,
            role: UserRole::Admin
        })
    );

    claims.remove("role");
    assert_eq!(AuthUser::from_claims(&claims), None);
}
