//! # warden_core
//!
//! Core domain logic for Warden: password hashing, token issuance and
//! validation, the credential workflows, and the user record store.

pub mod auth;
pub mod config;
pub mod migrate;
pub mod models;
pub mod store;
pub mod validation;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
