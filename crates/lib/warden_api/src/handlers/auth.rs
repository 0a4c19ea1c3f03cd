//! Authentication request handlers.

use axum::Json;
use axum::extract::State;
use tracing::info;
use warden_core::models::auth::{LoginRequest, TokenResponse};

use crate::AppState;
use crate::error::AppResult;
use crate::models::{ForgotPasswordRequest, MessageResponse};

/// `POST /login` — authenticate with email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state.credentials.login(&body.email, &body.password).await?;
    Ok(Json(TokenResponse { token }))
}

/// `POST /forgot-pass` — acknowledge a recovery request.
///
/// The reply is identical whether or not the email is registered.
pub async fn forgot_pass_handler(
    Json(body): Json<ForgotPasswordRequest>,
) -> Json<MessageResponse> {
    let email = body.email.trim();
    info!("password recovery requested");
    Json(MessageResponse {
        message: format!(
            "If the email {email} is registered, you will receive a recovery message."
        ),
    })
}
