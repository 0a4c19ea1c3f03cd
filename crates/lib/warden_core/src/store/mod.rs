//! User record store.
//!
//! The credential workflows and the HTTP layer only talk to `UserStore`.
//! `PgUserStore` backs it with PostgreSQL; `MemoryUserStore` keeps records
//! in process.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::auth::Credential;
use crate::models::user::{NewUser, User, UserUpdate};

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

/// Store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Store error: {0}")]
    Internal(String),
}

/// Persistence for user records and their password hashes.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user, returning the new ID.
    async fn insert(&self, user: &NewUser) -> Result<i64, StoreError>;

    /// Users whose name or nick contains `query`, case-insensitively.
    async fn search(&self, query: &str) -> Result<Vec<User>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    /// Update profile fields. Returns `false` if the user does not exist.
    async fn update(&self, id: i64, update: &UserUpdate) -> Result<bool, StoreError>;

    /// Delete a user. Returns `false` if the user does not exist.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    /// Credential (id, hash, role) for login.
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, StoreError>;

    async fn find_password_hash(&self, id: i64) -> Result<Option<String>, StoreError>;

    async fn update_password_hash(&self, id: i64, hash: &str) -> Result<(), StoreError>;
}
