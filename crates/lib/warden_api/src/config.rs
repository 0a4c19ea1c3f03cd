//! API server configuration.

use chrono::Duration;
use warden_core::config::{AuthConfig, ConfigError, DEFAULT_BCRYPT_COST, DEFAULT_TOKEN_TTL_HOURS};

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8080;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:8080").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Signing key, token lifetime and bcrypt cost.
    pub auth: AuthConfig,
}

impl ApiConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable          | Default                                 |
    /// |-------------------|-----------------------------------------|
    /// | `API_PORT`        | `8080`                                  |
    /// | `DATABASE_URL`    | `postgres://localhost:5432/warden`      |
    /// | `SECRET_KEY`      | required                                |
    /// | `TOKEN_TTL_HOURS` | `6`                                     |
    /// | `BCRYPT_COST`     | `10`                                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Unparseable port falls back to the default.
        let port = lookup("API_PORT")
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "postgres://localhost:5432/warden".into());

        let secret = lookup("SECRET_KEY").ok_or(ConfigError::Missing("SECRET_KEY"))?;

        let ttl_hours = parse_or("TOKEN_TTL_HOURS", &lookup, DEFAULT_TOKEN_TTL_HOURS)?;
        let bcrypt_cost = parse_or("BCRYPT_COST", &lookup, DEFAULT_BCRYPT_COST)?;

        let auth = AuthConfig::new(secret.into_bytes(), Duration::hours(ttl_hours), bcrypt_cost)?;

        Ok(Self {
            bind_addr: format!("0.0.0.0:{port}"),
            database_url,
            auth,
        })
    }
}

fn parse_or<T, F>(name: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}
