//! Credential workflows: login, registration and password change.
//!
//! bcrypt runs on the blocking pool so request tasks keep the executor free.

use std::sync::Arc;

use tracing::{debug, info};

use super::AuthError;
use super::password::PasswordHasher;
use super::token::TokenService;
use crate::models::user::{NewUser, Registration, User};
use crate::store::UserStore;
use crate::validation::{check_password, prepare_registration};

/// Plaintext verified when an email is unknown, so that path costs one bcrypt
/// verification like a wrong password does.
const DUMMY_PASSWORD: &str = "warden-dummy-password";

/// Orchestrates the store, the password hasher and the token issuer.
#[derive(Clone)]
pub struct CredentialService {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: Arc<TokenService>,
    dummy_hash: Arc<str>,
}

impl CredentialService {
    pub fn new(
        store: Arc<dyn UserStore>,
        hasher: PasswordHasher,
        tokens: Arc<TokenService>,
    ) -> Result<Self, AuthError> {
        let dummy_hash = hasher.hash(DUMMY_PASSWORD)?;
        Ok(Self {
            store,
            hasher,
            tokens,
            dummy_hash: Arc::from(dummy_hash),
        })
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    async fn hash(&self, plaintext: String) -> Result<String, AuthError> {
        let hasher = self.hasher;
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&plaintext)).await??;
        Ok(hash)
    }

    async fn verify(&self, hash: String, plaintext: String) -> Result<(), AuthError> {
        let hasher = self.hasher;
        tokio::task::spawn_blocking(move || hasher.verify(&hash, &plaintext)).await??;
        Ok(())
    }

    /// Authenticate with email + password and issue an access token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let email = email.trim();
        let credential = self.store.find_by_email(email).await?;

        let Some(credential) = credential else {
            // Unknown email: burn the same bcrypt time, then fail.
            let _ = self
                .verify(self.dummy_hash.to_string(), password.to_string())
                .await;
            debug!("login for unknown email");
            return Err(AuthError::Unauthorized);
        };

        self.verify(credential.password_hash, password.to_string())
            .await?;

        let token = self.tokens.issue(credential.user_id, credential.role)?;
        info!(user_id = credential.user_id, "login succeeded");
        Ok(token)
    }

    /// Rotate a user's password after verifying the current one.
    pub async fn change_password(
        &self,
        user_id: i64,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let current = self
            .store
            .find_password_hash(user_id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        self.verify(current, old_password.to_string()).await?;

        check_password(new_password)?;
        let new_hash = self.hash(new_password.to_string()).await?;
        self.store.update_password_hash(user_id, &new_hash).await?;

        info!(user_id, "password changed");
        Ok(())
    }

    /// Validate, hash and persist a new user with the role it names.
    pub async fn register(&self, registration: Registration) -> Result<User, AuthError> {
        let registration = prepare_registration(registration)?;
        let password_hash = self.hash(registration.password).await?;

        let new_user = NewUser {
            name: registration.name,
            nick: registration.nick,
            email: registration.email,
            password_hash,
            role: registration.role,
        };
        let id = self.store.insert(&new_user).await?;
        info!(user_id = id, role = new_user.role, "user registered");

        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AuthError::Internal(format!("user {id} missing after insert")))
    }
}
