//! Authentication and credential management.
//!
//! Provides password hashing, JWT issuance and validation, and the login,
//! registration and password-change workflows used by `warden_api`.

pub mod credentials;
pub mod password;
pub mod token;

use thiserror::Error;

use crate::store::StoreError;
use crate::validation::ValidationError;
use password::PasswordError;
use token::TokenError;

/// Errors crossing the core boundary.
///
/// Every lower-level failure is folded into one of these three kinds.
/// `Unauthorized` deliberately carries no reason.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid credentials")]
    Unauthorized,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<PasswordError> for AuthError {
    fn from(e: PasswordError) -> Self {
        match e {
            PasswordError::Mismatch => AuthError::Unauthorized,
            PasswordError::TooLong => AuthError::Validation(ValidationError::PasswordTooLong),
            PasswordError::Hashing(e) => AuthError::Internal(format!("bcrypt hash: {e}")),
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Unauthorized => AuthError::Unauthorized,
            TokenError::Signing(e) => AuthError::Internal(format!("jwt encode: {e}")),
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail => AuthError::Validation(ValidationError::EmailTaken),
            other => AuthError::Internal(other.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(e: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("blocking task: {e}"))
    }
}
