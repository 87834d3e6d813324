use axum::http::HeaderValue;

use crate::auth::jwt::TokenConfig;

/// Reasons the process cannot start with the current environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in the environment")]
    Missing(&'static str),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("JWT_ACCESS_SECRET and JWT_REFRESH_SECRET must differ")]
    SharedSecret,
}

/// Server configuration loaded from environment variables.
///
/// Built once at startup and shared read-only through `AppState`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Add the `Secure` attribute to the refresh-token cookie.
    pub cookie_secure: bool,
    /// How often expired ledger rows are purged (default: `3600`).
    pub ledger_purge_interval_secs: u64,
    /// Token secrets and lifetimes.
    pub jwt: TokenConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Required | Default                 |
    /// |------------------------------|----------|-------------------------|
    /// | `DATABASE_URL`               | **yes**  | --                      |
    /// | `HOST`                       | no       | `0.0.0.0`               |
    /// | `PORT`                       | no       | `5000`                  |
    /// | `CORS_ORIGINS`               | no       | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`       | no       | `30`                    |
    /// | `COOKIE_SECURE`              | no       | `false`                 |
    /// | `LEDGER_PURGE_INTERVAL_SECS` | no       | `3600`                  |
    ///
    /// Token settings are documented on [`TokenConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = parse_var("PORT", "5000", "u16")?;
        let database_url = required_var("DATABASE_URL")?;

        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|_| ConfigError::Invalid {
                    name: "CORS_ORIGINS",
                    expected: "origin list",
                    value: origin.to_owned(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let request_timeout_secs = parse_var("REQUEST_TIMEOUT_SECS", "30", "u64")?;
        let cookie_secure = parse_var("COOKIE_SECURE", "false", "bool")?;
        let ledger_purge_interval_secs = parse_var("LEDGER_PURGE_INTERVAL_SECS", "3600", "u64")?;

        let jwt = TokenConfig::from_env()?;

        Ok(Self {
            host,
            port,
            database_url,
            cors_origins,
            request_timeout_secs,
            cookie_secure,
            ledger_purge_interval_secs,
            jwt,
        })
    }
}

/// Read a variable that must be present and non-empty.
pub(crate) fn required_var(name: &'static str) -> Result<String, ConfigError> {
    let value = std::env::var(name).map_err(|_| ConfigError::Missing(name))?;
    if value.trim().is_empty() {
        return Err(ConfigError::Empty(name));
    }
    Ok(value)
}

/// Read and parse an optional variable, falling back to `default`.
pub(crate) fn parse_var<T: std::str::FromStr>(
    name: &'static str,
    default: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    let raw = std::env::var(name).unwrap_or_else(|_| default.to_owned());
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        expected,
        value: raw,
    })
}
