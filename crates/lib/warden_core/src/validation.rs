//! User input validation and normalization.
//!
//! Text fields are trimmed first, then checked in a fixed order. Only the
//! first failure is reported.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::auth::password::MAX_PASSWORD_BYTES;
use crate::models::user::{Registration, UserUpdate};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// Field-level validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,

    #[error("Nick is required")]
    NickRequired,

    #[error("Email is required")]
    EmailRequired,

    #[error("Email is invalid")]
    EmailInvalid,

    #[error("Password is required")]
    PasswordRequired,

    #[error("Password must be at most 71 bytes")]
    PasswordTooLong,

    #[error("Role must not be negative")]
    RoleInvalid,

    #[error("Email is already registered")]
    EmailTaken,
}

impl ValidationError {
    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NameRequired => "name",
            ValidationError::NickRequired => "nick",
            ValidationError::EmailRequired
            | ValidationError::EmailInvalid
            | ValidationError::EmailTaken => "email",
            ValidationError::PasswordRequired | ValidationError::PasswordTooLong => "password",
            ValidationError::RoleInvalid => "role",
        }
    }
}

/// Syntactic email check.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

fn check_profile(name: &str, nick: &str, email: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if nick.is_empty() {
        return Err(ValidationError::NickRequired);
    }
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::EmailInvalid);
    }
    Ok(())
}

/// Check a new plaintext password before it is hashed.
pub fn check_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::PasswordTooLong);
    }
    Ok(())
}

/// Normalize and validate a registration. The password is left untouched.
pub fn prepare_registration(mut input: Registration) -> Result<Registration, ValidationError> {
    input.name = input.name.trim().to_string();
    input.nick = input.nick.trim().to_string();
    input.email = input.email.trim().to_string();

    check_profile(&input.name, &input.nick, &input.email)?;
    check_password(&input.password)?;
    if input.role < 0 {
        return Err(ValidationError::RoleInvalid);
    }
    Ok(input)
}

/// Normalize and validate a profile edit.
pub fn prepare_update(mut input: UserUpdate) -> Result<UserUpdate, ValidationError> {
    input.name = input.name.trim().to_string();
    input.nick = input.nick.trim().to_string();
    input.email = input.email.trim().to_string();

    check_profile(&input.name, &input.nick, &input.email)?;
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(name: &str, nick: &str, email: &str, password: &str) -> Registration {
        Registration {
            name: name.into(),
            nick: nick.into(),
            email: email.into(),
            password: password.into(),
            role: 0,
        }
    }

    #[test]
    fn accepts_and_trims_valid_registration() {
        let prepared =
            prepare_registration(registration("  Ana  ", " ana", "ana@example.com ", "pw")).unwrap();
        assert_eq!(prepared.name, "Ana");
        assert_eq!(prepared.nick, "ana");
        assert_eq!(prepared.email, "ana@example.com");
        assert_eq!(prepared.password, "pw");
    }

    #[test]
    fn empty_name_is_reported_first() {
        let err = prepare_registration(registration("", "", "", "")).unwrap_err();
        assert_eq!(err, ValidationError::NameRequired);
        assert_eq!(err.field(), "name");
    }

    #[test]
    fn whitespace_only_name_is_empty() {
        let err = prepare_registration(registration("   ", "ana", "a@b.com", "pw")).unwrap_err();
        assert_eq!(err, ValidationError::NameRequired);
    }

    #[test]
    fn missing_nick() {
        let err = prepare_registration(registration("Ana", "", "a@b.com", "pw")).unwrap_err();
        assert_eq!(err, ValidationError::NickRequired);
    }

    #[test]
    fn missing_email() {
        let err = prepare_registration(registration("Ana", "ana", " ", "pw")).unwrap_err();
        assert_eq!(err, ValidationError::EmailRequired);
    }

    #[test]
    fn malformed_email() {
        for email in ["ana", "ana@", "@b.com", "ana@b", "a na@b.com"] {
            let err = prepare_registration(registration("Ana", "ana", email, "pw")).unwrap_err();
            assert_eq!(err, ValidationError::EmailInvalid, "email: {email}");
        }
    }

    #[test]
    fn missing_password() {
        let err = prepare_registration(registration("Ana", "ana", "a@b.com", "")).unwrap_err();
        assert_eq!(err, ValidationError::PasswordRequired);
        assert_eq!(err.field(), "password");
    }

    #[test]
    fn password_longer_than_bcrypt_reads_is_rejected() {
        let long = "x".repeat(100);
        let err = prepare_registration(registration("Ana", "ana", "a@b.com", &long)).unwrap_err();
        assert_eq!(err, ValidationError::PasswordTooLong);
        assert_eq!(err.field(), "password");

        let longest = "x".repeat(MAX_PASSWORD_BYTES);
        assert!(check_password(&longest).is_ok());
    }

    #[test]
    fn negative_role_is_rejected() {
        let mut reg = registration("Ana", "ana", "a@b.com", "pw");
        reg.role = -1;
        let err = prepare_registration(reg).unwrap_err();
        assert_eq!(err, ValidationError::RoleInvalid);
        assert_eq!(err.field(), "role");
    }

    #[test]
    fn update_does_not_require_password() {
        let update = UserUpdate {
            name: "Ana".into(),
            nick: "ana".into(),
            email: "a@b.com".into(),
        };
        assert_eq!(prepare_update(update.clone()).unwrap(), update);
    }

    #[test]
    fn update_validates_email() {
        let update = UserUpdate {
            name: "Ana".into(),
            nick: "ana".into(),
            email: "nope".into(),
        };
        assert_eq!(prepare_update(update).unwrap_err(), ValidationError::EmailInvalid);
    }
}
