//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! lex-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `REGISTRY_DATABASE_URL` - SQLite connection string (the file is created if missing)
//!
//! Migration files live in `crates/registry/migrations/` and are embedded at
//! compile time.

use lex_registry::db;

use super::{CommandError, connect};

/// Apply all pending registry migrations.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;
    db::run_migrations(&pool).await?;
    pool.close().await;
    Ok(())
}
