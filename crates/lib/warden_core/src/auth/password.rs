//! Password hashing via bcrypt.

use thiserror::Error;
use tracing::warn;

use crate::config::AuthConfig;

/// Longest password bcrypt reads in full. Its 72-byte key includes a NUL
/// terminator; anything longer would be silently cut.
pub const MAX_PASSWORD_BYTES: usize = 71;

/// Password hashing failures.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Password mismatch")]
    Mismatch,

    #[error("Password exceeds 71 bytes")]
    TooLong,
}

/// Salted bcrypt hasher with a fixed work factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.bcrypt_cost())
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password with a fresh random salt.
    ///
    /// Passwords bcrypt would truncate are refused with `TooLong`.
    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        match bcrypt::non_truncating_hash(plaintext, self.cost) {
            Ok(hash) => Ok(hash),
            Err(bcrypt::BcryptError::Truncation(_)) => Err(PasswordError::TooLong),
            Err(e) => Err(e.into()),
        }
    }

    /// Verify a password against a bcrypt hash.
    ///
    /// A hash bcrypt cannot parse never verifies, and neither does a
    /// plaintext longer than bcrypt reads.
    pub fn verify(&self, hash: &str, plaintext: &str) -> Result<(), PasswordError> {
        match bcrypt::non_truncating_verify(plaintext, hash) {
            Ok(true) => Ok(()),
            Ok(false) => Err(PasswordError::Mismatch),
            Err(bcrypt::BcryptError::Truncation(_)) => Err(PasswordError::Mismatch),
            Err(e) => {
                warn!(error = %e, "stored password hash is unreadable");
                Err(PasswordError::Mismatch)
            }
        }
    }
}
