//! In-process user store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{StoreError, UserStore};
use crate::models::auth::Credential;
use crate::models::user::{NewUser, User, UserUpdate};

#[derive(Debug)]
struct StoredUser {
    user: User,
    password_hash: String,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    users: BTreeMap<i64, StoredUser>,
}

impl Inner {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.user.email == email && Some(u.user.id) != except)
    }
}

/// `UserStore` held in memory. IDs start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    inner: RwLock<Inner>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: &NewUser) -> Result<i64, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.email_taken(&user.email, None) {
            return Err(StoreError::DuplicateEmail);
        }
        inner.next_id += 1;
        let id = inner.next_id;
        inner.users.insert(
            id,
            StoredUser {
                user: User {
                    id,
                    name: user.name.clone(),
                    nick: user.nick.clone(),
                    email: user.email.clone(),
                    role: user.role,
                    created_at: Utc::now(),
                },
                password_hash: user.password_hash.clone(),
            },
        );
        Ok(id)
    }

    async fn search(&self, query: &str) -> Result<Vec<User>, StoreError> {
        let query = query.to_lowercase();
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .filter(|u| {
                u.user.name.to_lowercase().contains(&query)
                    || u.user.nick.to_lowercase().contains(&query)
            })
            .map(|u| u.user.clone())
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).map(|u| u.user.clone()))
    }

    async fn update(&self, id: i64, update: &UserUpdate) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&id) {
            return Ok(false);
        }
        if inner.email_taken(&update.email, Some(id)) {
            return Err(StoreError::DuplicateEmail);
        }
        let Some(stored) = inner.users.get_mut(&id) else {
            return Ok(false);
        };
        stored.user.name = update.name.clone();
        stored.user.nick = update.nick.clone();
        stored.user.email = update.email.clone();
        Ok(true)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.users.remove(&id).is_some())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|u| u.user.email == email)
            .map(|u| Credential {
                user_id: u.user.id,
                password_hash: u.password_hash.clone(),
                role: u.user.role,
            }))
    }

    async fn find_password_hash(&self, id: i64) -> Result<Option<String>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).map(|u| u.password_hash.clone()))
    }

    async fn update_password_hash(&self, id: i64, hash: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if let Some(stored) = inner.users.get_mut(&id) {
            stored.password_hash = hash.to_string();
        }
        Ok(())
    }
}
