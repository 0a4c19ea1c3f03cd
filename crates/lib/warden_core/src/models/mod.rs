//! Domain models.
//!
//! These are internal domain models shared by the store, the credential
//! workflows and the HTTP layer.

pub mod auth;
pub mod user;
