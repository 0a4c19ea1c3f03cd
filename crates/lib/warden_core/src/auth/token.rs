//! JWT access token issuance and validation.

use std::fmt;

use chrono::{Duration, Utc};
use http::HeaderMap;
use http::header::AUTHORIZATION;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use tracing::debug;

use crate::config::AuthConfig;
use crate::models::auth::TokenClaims;

/// Token failures. Every validation failure collapses into `Unauthorized`.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("jwt encode: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("Unauthorized")]
    Unauthorized,
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// Signs and verifies HS256 access tokens with the process secret key.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(config.secret()),
            decoding: DecodingKey::from_secret(config.secret()),
            validation,
            ttl: config.token_ttl(),
        }
    }

    /// Token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a signed token for `user_id` expiring after the configured TTL.
    pub fn issue(&self, user_id: i64, role: i64) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = TokenClaims {
            user_id,
            role,
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).map_err(TokenError::Signing)
    }

    /// Verify a raw token string: signature, then `now < exp`.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let claims = decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "token rejected");
                TokenError::Unauthorized
            })?;

        if claims.exp <= Utc::now().timestamp() {
            debug!(user_id = claims.user_id, "token expired");
            return Err(TokenError::Unauthorized);
        }
        Ok(claims)
    }

    /// Validate the bearer token carried by a request.
    pub fn validate(&self, headers: &HeaderMap) -> Result<TokenClaims, TokenError> {
        let token = bearer_token(headers).ok_or_else(|| {
            debug!("missing or malformed authorization header");
            TokenError::Unauthorized
        })?;
        self.verify(token)
    }

    /// Subject ID of the caller.
    pub fn extract_subject_id(&self, headers: &HeaderMap) -> Result<i64, TokenError> {
        self.validate(headers).map(|claims| claims.user_id)
    }
}
