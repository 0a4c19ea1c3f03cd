//! Shared helpers for router-level tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Duration;
use serde_json::Value;
use tower::ServiceExt;
use warden_api::AppState;
use warden_core::auth::password::PasswordHasher;
use warden_core::config::AuthConfig;
use warden_core::models::user::NewUser;
use warden_core::store::{MemoryUserStore, UserStore};

pub const SECRET: &[u8] = b"integration-test-secret";

/// Router over an in-memory store.
pub struct TestApp {
    pub app: Router,
    pub store: Arc<MemoryUserStore>,
    pub state: AppState,
}

pub fn auth_config(secret: &[u8]) -> AuthConfig {
    AuthConfig::new(secret.to_vec(), Duration::hours(6), 4).expect("auth config")
}

pub fn test_app() -> TestApp {
    let store = Arc::new(MemoryUserStore::new());
    let state = AppState::new(store.clone(), &auth_config(SECRET)).expect("app state");
    TestApp {
        app: warden_api::router(state.clone()),
        store,
        state,
    }
}

impl TestApp {
    /// Insert a user directly into the store.
    pub async fn seed(&self, email: &str, password: &str, role: i64) -> i64 {
        self.store
            .insert(&NewUser {
                name: "Seed User".into(),
                nick: "seed".into(),
                email: email.into(),
                password_hash: PasswordHasher::new(4).hash(password).expect("hash"),
                role,
            })
            .await
            .expect("seed user")
    }

    /// Issue a valid token for `user_id`.
    pub fn token_for(&self, user_id: i64) -> String {
        self.state.tokens.issue(user_id, 0).expect("issue token")
    }

    /// Seed an operator account and return a token for it.
    pub async fn operator_token(&self) -> String {
        let id = self.seed("operator@b.com", "operator1", 1).await;
        self.token_for(id)
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let resp = self.app.clone().oneshot(request).await.expect("request");
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}

pub fn json_request(method: &str, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request")
}
