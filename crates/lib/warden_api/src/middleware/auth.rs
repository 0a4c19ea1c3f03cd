//! Authentication gate: Bearer token extraction and JWT verification.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::Request;
use warden_core::auth::token::TokenService;
use warden_core::models::auth::TokenClaims;

use super::RequestInterceptor;
use crate::error::AppError;

/// Key used to store `TokenClaims` in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub TokenClaims);

impl AuthenticatedUser {
    pub fn user_id(&self) -> i64 {
        self.0.user_id
    }
}

/// Rejects requests without a valid `Authorization: Bearer <token>` and
/// injects `AuthenticatedUser` into the extensions of those it accepts.
pub struct AuthGate {
    tokens: Arc<TokenService>,
}

impl AuthGate {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl RequestInterceptor for AuthGate {
    async fn intercept(&self, request: &mut Request) -> Result<(), AppError> {
        let claims = self.tokens.validate(request.headers())?;
        request.extensions_mut().insert(AuthenticatedUser(claims));
        Ok(())
    }

    fn name(&self) -> &str {
        "auth_gate"
    }
}
