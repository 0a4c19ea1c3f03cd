//! User CRUD and password change handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::info;
use warden_core::models::auth::PasswordChange;
use warden_core::models::user::{Registration, User, UserUpdate};
use warden_core::validation::prepare_update;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::SearchQuery;

/// `POST /users` — create a user with the role given in the body.
pub async fn create_user_handler(
    State(state): State<AppState>,
    axum::Extension(caller): axum::Extension<AuthenticatedUser>,
    Json(body): Json<Registration>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.credentials.register(body).await?;
    info!(caller = caller.user_id(), user_id = user.id, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users?user=<q>` — search users by name or nick.
pub async fn search_users_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<User>>> {
    let needle = query.user.unwrap_or_default().to_lowercase();
    let users = state.store.search(&needle).await?;
    Ok(Json(users))
}

/// `GET /users/{user_id}` — fetch a single user.
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<User>> {
    let user = state
        .store
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {user_id}")))?;
    Ok(Json(user))
}

/// `PUT /users/{user_id}` — update name, nick and email.
pub async fn update_user_handler(
    State(state): State<AppState>,
    axum::Extension(caller): axum::Extension<AuthenticatedUser>,
    Path(user_id): Path<i64>,
    Json(body): Json<UserUpdate>,
) -> AppResult<StatusCode> {
    let update = prepare_update(body)?;
    if !state.store.update(user_id, &update).await? {
        return Err(AppError::NotFound(format!("user {user_id}")));
    }
    info!(caller = caller.user_id(), user_id, "user updated");
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /users/{user_id}` — delete a user.
pub async fn delete_user_handler(
    State(state): State<AppState>,
    axum::Extension(caller): axum::Extension<AuthenticatedUser>,
    Path(user_id): Path<i64>,
) -> AppResult<StatusCode> {
    if !state.store.delete(user_id).await? {
        return Err(AppError::NotFound(format!("user {user_id}")));
    }
    info!(caller = caller.user_id(), user_id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /users/{user_id}/update-pass` — change a user's password.
pub async fn update_password_handler(
    State(state): State<AppState>,
    axum::Extension(caller): axum::Extension<AuthenticatedUser>,
    Path(user_id): Path<i64>,
    Json(body): Json<PasswordChange>,
) -> AppResult<StatusCode> {
    info!(caller = caller.user_id(), user_id, "password change requested");
    state
        .credentials
        .change_password(user_id, &body.old, &body.new)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
