//! Application state for mesa-server

use sqlx::SqlitePool;

use crate::config::Config;
use crate::db::{self, DbService};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT signing secret
    pub jwt_secret: String,
}

impl AppState {
    /// Open the database, run migrations and make sure the configured
    /// admin account exists.
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let db = DbService::new(&config.database_url).await?;

        db::employees::ensure_bootstrap_admin(
            &db.pool,
            &config.admin_username,
            &config.admin_password,
        )
        .await?;

        Ok(Self {
            pool: db.pool,
            jwt_secret: config.jwt_secret.clone(),
        })
    }

}
