//! Authentication configuration.
//!
//! Built once at process start and handed to the token service and the
//! password hasher. Never mutated afterwards.

use std::sync::Arc;

use chrono::Duration;
use secrecy::{ExposeSecret, SecretSlice};
use thiserror::Error;

/// Default token lifetime: 6 hours.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 6;

/// Default bcrypt cost factor.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Lowest and highest cost bcrypt accepts.
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Secret key must not be empty")]
    EmptySecret,

    #[error("Token TTL must be positive, got {0} seconds")]
    InvalidTtl(i64),

    #[error("bcrypt cost must be between 4 and 31, got {0}")]
    InvalidCost(u32),

    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Secret key, token lifetime and hashing work factor.
///
/// `Debug` never prints the secret.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    secret: Arc<SecretSlice<u8>>,
    token_ttl: Duration,
    bcrypt_cost: u32,
}

impl AuthConfig {
    /// Validates and builds the configuration.
    pub fn new(secret: Vec<u8>, token_ttl: Duration, bcrypt_cost: u32) -> Result<Self, ConfigError> {
        if secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        if token_ttl <= Duration::zero() {
            return Err(ConfigError::InvalidTtl(token_ttl.num_seconds()));
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidCost(bcrypt_cost));
        }
        Ok(Self {
            secret: Arc::new(SecretSlice::from(secret)),
            token_ttl,
            bcrypt_cost,
        })
    }

    /// Builds a configuration with the default TTL and cost.
    pub fn with_defaults(secret: Vec<u8>) -> Result<Self, ConfigError> {
        Self::new(
            secret,
            Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
            DEFAULT_BCRYPT_COST,
        )
    }

    /// Raw signing key bytes.
    pub fn secret(&self) -> &[u8] {
        self.secret.expose_secret()
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }
}
