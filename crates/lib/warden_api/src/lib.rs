//! # warden_api
//!
//! HTTP API library for Warden.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use warden_core::auth::AuthError;
use warden_core::auth::credentials::CredentialService;
use warden_core::auth::password::PasswordHasher;
use warden_core::auth::token::TokenService;
use warden_core::config::AuthConfig;
use warden_core::store::UserStore;

use crate::handlers::{auth, health, users};
use crate::middleware::auth::AuthGate;
use crate::middleware::logging::RequestLogger;
use crate::middleware::{InterceptorChain, RequestInterceptor, run_chain};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// User record store.
    pub store: Arc<dyn UserStore>,
    /// Login, registration and password-change workflows.
    pub credentials: CredentialService,
    /// Access token issuer/validator.
    pub tokens: Arc<TokenService>,
}

impl AppState {
    /// Wire the auth services over `store` from an immutable `AuthConfig`.
    pub fn new(store: Arc<dyn UserStore>, auth: &AuthConfig) -> Result<Self, AuthError> {
        let tokens = Arc::new(TokenService::new(auth));
        let hasher = PasswordHasher::from_config(auth);
        let credentials = CredentialService::new(store.clone(), hasher, tokens.clone())?;
        Ok(Self {
            store,
            credentials,
            tokens,
        })
    }
}

/// Builds the Axum router with all routes and shared state.
///
/// Every route runs behind exactly one interceptor chain:
/// public routes behind `[RequestLogger]`, protected routes behind
/// `[RequestLogger, AuthGate]`.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public_interceptors: Vec<Arc<dyn RequestInterceptor>> = vec![Arc::new(RequestLogger)];
    let protected_interceptors: Vec<Arc<dyn RequestInterceptor>> = vec![
        Arc::new(RequestLogger),
        Arc::new(AuthGate::new(state.tokens.clone())),
    ];
    let public_chain = Arc::new(InterceptorChain::new(public_interceptors));
    let protected_chain = Arc::new(InterceptorChain::new(protected_interceptors));

    // Public routes (no auth required)
    let public = Router::new()
        .route("/health", get(health::health_handler))
        .route("/login", post(auth::login_handler))
        .route("/forgot-pass", post(auth::forgot_pass_handler))
        .layer(axum::middleware::from_fn_with_state(public_chain, run_chain));

    // Protected routes (require auth)
    let protected = Router::new()
        .route(
            "/users",
            get(users::search_users_handler).post(users::create_user_handler),
        )
        .route(
            "/users/{user_id}",
            get(users::get_user_handler)
                .put(users::update_user_handler)
                .delete(users::delete_user_handler),
        )
        .route(
            "/users/{user_id}/update-pass",
            put(users::update_password_handler),
        )
        .layer(axum::middleware::from_fn_with_state(
            protected_chain,
            run_chain,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
