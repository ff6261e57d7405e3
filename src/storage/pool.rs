//! Database connection pool management.
//!
//! This module initializes the SQLite connection pool with:
//! - Automatic database file creation
//! - WAL mode enabled for concurrent access
//! - The report history table

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use log::{error, info};
use sqlx::{Pool, Sqlite, SqlitePool};

use crate::error_handling::DatabaseError;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS schema_validation (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source TEXT NOT NULL,
    schemas_found INTEGER NOT NULL,
    overall_score INTEGER NOT NULL,
    error_count INTEGER NOT NULL,
    warning_count INTEGER NOT NULL,
    rich_snippet_count INTEGER NOT NULL,
    report_json TEXT NOT NULL,
    validated_at INTEGER NOT NULL
)";

const CREATE_SOURCE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_schema_validation_source ON schema_validation (source)";

/// Initializes and returns a database connection pool for `db_path`.
///
/// Creates the database file if it doesn't exist, enables WAL mode and
/// creates the history table.
pub async fn init_db_pool_with_path(db_path: &Path) -> Result<Arc<Pool<Sqlite>>, DatabaseError> {
    let db_path_str = db_path.to_string_lossy().to_string();
    match OpenOptions::new()
        .read(true)
        .write(true)
        .create_new(true)
        .open(&db_path_str)
    {
        Ok(_) => info!("Database file created successfully."),
        Err(ref e) if e.kind() == ErrorKind::AlreadyExists => {
            info!("Database file already exists.")
        }
        Err(e) => {
            error!("Failed to create database file: {e}");
            return Err(DatabaseError::FileCreationError(e.to_string()));
        }
    }

    let pool = SqlitePool::connect(&format!("sqlite:{db_path_str}"))
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {e}");
            DatabaseError::SqlError(e)
        })?;

    sqlx::query("PRAGMA journal_mode=WAL")
        .execute(&pool)
        .await
        .map_err(|e| {
            error!("Failed to set WAL mode: {e}");
            DatabaseError::SqlError(e)
        })?;

    run_migrations(&pool).await?;

    Ok(Arc::new(pool))
}

/// Creates the history table and its index if they are missing.
pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<(), DatabaseError> {
    for statement in [CREATE_TABLE, CREATE_SOURCE_INDEX] {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
