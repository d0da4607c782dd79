//! Registry configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `REGISTRY_DATABASE_URL` - SQLite connection string (default: `sqlite://lex.db?mode=rwc`)
//! - `REGISTRY_HOST` - Bind address (default: 127.0.0.1)
//! - `REGISTRY_PORT` - Listen port (default: 3000)
//! - `REGISTRY_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `REGISTRY_RUN_MIGRATIONS` - Apply embedded migrations on startup (default: true)
//! - `REGISTRY_CORS_ORIGINS` - Comma-separated allowed origins (default: any origin)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderValue;
use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://lex.db?mode=rwc";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Registry service configuration.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// SQLite connection URL
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Upper bound on pooled store connections
    pub max_connections: u32,
    /// Whether to apply migrations before serving
    pub run_migrations: bool,
    /// Browser origins allowed by CORS; empty means any origin
    pub cors_origins: Vec<HeaderValue>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl RegistryConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = SecretString::from(
            get("REGISTRY_DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned()),
        );
        let host = parse_or(get("REGISTRY_HOST"), "REGISTRY_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = parse_or(get("REGISTRY_PORT"), "REGISTRY_PORT", 3000)?;
        let max_connections =
            parse_or(get("REGISTRY_MAX_CONNECTIONS"), "REGISTRY_MAX_CONNECTIONS", 5)?;
        if max_connections == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "REGISTRY_MAX_CONNECTIONS".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        let run_migrations = match get("REGISTRY_RUN_MIGRATIONS") {
            Some(value) => parse_bool(&value).ok_or_else(|| {
                ConfigError::InvalidEnvVar("REGISTRY_RUN_MIGRATIONS".to_string(), value)
            })?,
            None => true,
        };
        let cors_origins = get("REGISTRY_CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            database_url,
            host,
            port,
            max_connections,
            run_migrations,
            cors_origins,
            sentry_dsn: get("SENTRY_DSN"),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| {
                ConfigError::InvalidEnvVar("REGISTRY_CORS_ORIGINS".to_string(), e.to_string())
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<RegistryConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        RegistryConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.database_url.expose_secret(), DEFAULT_DATABASE_URL);
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.max_connections, 5);
        assert!(config.run_migrations);
        assert!(config.cors_origins.is_empty());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("REGISTRY_DATABASE_URL", "sqlite::memory:"),
            ("REGISTRY_HOST", "0.0.0.0"),
            ("REGISTRY_PORT", "8080"),
            ("REGISTRY_RUN_MIGRATIONS", "off"),
            ("REGISTRY_CORS_ORIGINS", "http://localhost:5500, http://127.0.0.1:5500"),
        ])
        .unwrap();

        assert_eq!(config.database_url.expose_secret(), "sqlite::memory:");
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert!(!config.run_migrations);
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.cors_origins.get(1).unwrap(), "http://127.0.0.1:5500");
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = load(&[("REGISTRY_PORT", "  "), ("SENTRY_DSN", "")]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("REGISTRY_PORT", "http")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "REGISTRY_PORT"
        ));
        assert!(load(&[("REGISTRY_HOST", "localhost")]).is_err());
        assert!(load(&[("REGISTRY_MAX_CONNECTIONS", "0")]).is_err());
        assert!(load(&[("REGISTRY_RUN_MIGRATIONS", "maybe")]).is_err());
    }

    #[test]
    fn test_database_url_is_redacted_in_debug() {
        let config = load(&[("REGISTRY_DATABASE_URL", "sqlite:///srv/lex/private.db")]).unwrap();
        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("private.db"));
    }
}
