//! Database Module
//!
//! Handles the SQLite connection pool and migrations.

pub mod audit;
pub mod cash_ledger;
pub mod categories;
pub mod customers;
pub mod employees;
pub mod orders;
pub mod payments;
pub mod products;
pub mod store_info;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Database service — owns a SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Create a new database service with WAL mode
    pub async fn new(db_path: &str) -> Result<Self, BoxError> {
        // Build connection options: WAL, foreign keys, normal sync
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| format!("Invalid database path: {e}"))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("foreign_keys", "ON")
            .optimize_on_close(true, None);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| format!("Failed to open database: {e}"))?;

        // busy_timeout: wait 5s on write contention instead of failing
        sqlx::query("PRAGMA busy_timeout = 5000;")
            .execute(&pool)
            .await
            .map_err(|e| format!("Failed to set busy_timeout: {e}"))?;

        tracing::info!("Database connection established (SQLite WAL, busy_timeout=5000ms)");

        sqlx::migrate!("./migrations")
            .set_ignore_missing(true)
            .run(&pool)
            .await
            .map_err(|e| format!("Failed to apply migrations: {e}"))?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }

    /// In-memory database with the real schema. Used by tests; a single
    /// connection because every `sqlite::memory:` connection is its own
    /// database.
    pub async fn in_memory() -> Result<Self, BoxError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }
}

/// Whether a sqlx error is a unique-constraint violation. The open-table
/// guard relies on this: the partial unique index on open orders turns a
/// concurrent double-open into this error.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::Database(db) if db.kind() == sqlx::error::ErrorKind::UniqueViolation
    )
}
