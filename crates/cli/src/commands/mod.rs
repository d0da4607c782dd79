//! CLI subcommands.

pub mod clients;
pub mod migrate;

use sqlx::SqlitePool;
use thiserror::Error;

use lex_registry::config::{ConfigError, RegistryConfig};
use lex_registry::db;
use lex_registry::services::RegistryError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{0}")]
    Registry(#[from] RegistryError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Open the registry database named by the environment.
async fn connect() -> Result<SqlitePool, CommandError> {
    let config = RegistryConfig::from_env()?;

    tracing::info!("Connecting to registry database...");
    Ok(db::create_pool(&config.database_url, config.max_connections).await?)
}
