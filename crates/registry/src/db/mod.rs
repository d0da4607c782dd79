//! Database operations for the registry SQLite store.
//!
//! ## Tables
//!
//! - `person` - Generalized identity (unique email)
//! - `individual` - Natural person specialization (unique CPF)
//! - `organization` - Legal entity specialization (unique CNPJ)
//! - `client` - Client role attached to a person
//!
//! Every dependent table references `person` with `ON DELETE CASCADE`, so
//! foreign key enforcement is switched on for each pooled connection.
//!
//! # Migrations
//!
//! Migrations live in `crates/registry/migrations/` and are embedded in the
//! binary. They run on startup unless `REGISTRY_RUN_MIGRATIONS=false`, or
//! explicitly via:
//! ```bash
//! cargo run -p lex-cli -- migrate
//! ```

pub mod clients;

use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use clients::{ClientRepository, RegistrationError, RegistrationStage};

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Classify an insert failure, separating uniqueness violations.
    pub(crate) fn from_insert(err: sqlx::Error, what: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return Self::Conflict(format!("{what} already exists"));
        }
        Self::Database(err)
    }
}

/// Create a SQLite connection pool with foreign keys enforced.
///
/// # Arguments
///
/// * `database_url` - SQLite connection string (wrapped in `SecretString`)
/// * `max_connections` - Pool size
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the database cannot be opened.
pub async fn create_pool(
    database_url: &SecretString,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .foreign_keys(true)
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Create a private in-memory store with the schema applied.
///
/// The pool holds a single connection that never expires, because an
/// in-memory SQLite database lives only as long as its connection.
///
/// # Errors
///
/// Returns an error if the connection or a migration fails.
pub async fn create_memory_pool() -> Result<SqlitePool, MigrateError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    Ok(pool)
}

/// Apply all pending embedded migrations.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or the applied history diverges.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    tracing::info!("Running registry migrations");
    MIGRATOR.run(pool).await?;
    tracing::info!("Registry migrations complete");
    Ok(())
}
