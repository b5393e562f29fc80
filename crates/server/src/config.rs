//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `RESTO_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 3000)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 10)
//! - `DB_ACQUIRE_TIMEOUT_SECS` - Pool acquire timeout (default: 10)
//! - `KEEPALIVE_INTERVAL_SECS` - Database keep-alive interval (default: 120)
//! - `KEEPALIVE_TIMEOUT_SECS` - Upper bound for a single keep-alive ping (default: 10)
//! - `AUTH_TOKEN_TTL_HOURS` - Bearer token lifetime, at most one year (default: 24)
//! - `LOG_FORMAT` - `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//!
//! The CORS allow-list is fixed in code, see [`ALLOWED_ORIGINS`].

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Longest accepted bearer token lifetime (one year).
pub const MAX_AUTH_TOKEN_TTL_HOURS: i64 = 24 * 365;

/// Browser origins allowed to call the API cross-origin.
pub const ALLOWED_ORIGINS: [&str; 2] = [
    "https://uas-api-web2.vercel.app",
    "https://uas-api-web1.vercel.app",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Database pool settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub url: SecretString,
    /// Maximum pooled connections
    pub max_connections: u32,
    /// How long to wait for a pooled connection
    pub acquire_timeout: Duration,
}

/// Keep-alive ping settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepAliveConfig {
    /// Time between pings
    pub interval: Duration,
    /// Upper bound for a single ping
    pub timeout: Duration,
}

impl Default for KeepAliveConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(120),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Database pool settings
    pub database: DatabaseConfig,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Keep-alive ping settings
    pub keepalive: KeepAliveConfig,
    /// Lifetime of bearer tokens issued at login
    pub auth_token_ttl: chrono::Duration,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database = DatabaseConfig {
            url: get_database_url("RESTO_DATABASE_URL")?,
            max_connections: parse_env_or_default("DB_MAX_CONNECTIONS", 10)?,
            acquire_timeout: Duration::from_secs(parse_env_or_default(
                "DB_ACQUIRE_TIMEOUT_SECS",
                10,
            )?),
        };
        let host = parse_env_or_default("HOST", IpAddr::from([0, 0, 0, 0]))?;
        let port = parse_env_or_default("PORT", 3000)?;

        let keepalive = KeepAliveConfig {
            interval: Duration::from_secs(positive("KEEPALIVE_INTERVAL_SECS", 120)?),
            timeout: Duration::from_secs(positive("KEEPALIVE_TIMEOUT_SECS", 10)?),
        };

        let auth_token_ttl = token_ttl(parse_env_or_default("AUTH_TOKEN_TTL_HOURS", 24)?)?;

        let log_format = parse_log_format(get_optional_env("LOG_FORMAT").as_deref())?;

        Ok(Self {
            database,
            host,
            port,
            keepalive,
            auth_token_ttl,
            log_format,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Parse a strictly positive number of seconds.
fn positive(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = parse_env_or_default(key, default)?;
    if value == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(value)
}

/// Token lifetime in hours, between one hour and [`MAX_AUTH_TOKEN_TTL_HOURS`].
fn token_ttl(hours: i64) -> Result<chrono::Duration, ConfigError> {
    if !(1..=MAX_AUTH_TOKEN_TTL_HOURS).contains(&hours) {
        return Err(ConfigError::InvalidEnvVar(
            "AUTH_TOKEN_TTL_HOURS".to_string(),
            format!("must be between 1 and {MAX_AUTH_TOKEN_TTL_HOURS}"),
        ));
    }
    chrono::Duration::try_hours(hours).ok_or_else(|| {
        ConfigError::InvalidEnvVar("AUTH_TOKEN_TTL_HOURS".to_string(), "out of range".to_string())
    })
}

fn parse_log_format(value: Option<&str>) -> Result<LogFormat, ConfigError> {
    match value.map(str::to_ascii_lowercase).as_deref() {
        None | Some("text") => Ok(LogFormat::Text),
        Some("json") => Ok(LogFormat::Json),
        Some(other) => Err(ConfigError::InvalidEnvVar(
            "LOG_FORMAT".to_string(),
            format!("expected `text` or `json`, got `{other}`"),
        )),
    }
}
