use chrono::{DateTime, Utc};
use sqlx::SqliteExecutor;

use crate::util::hash_password;

/// Staff account row. Not a wire type: the hash stays server-side.
/// Every employee is dashboard staff and logs in with the `admin` role
/// claim.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

pub async fn find_by_username(
    ex: impl SqliteExecutor<'_>,
    username: &str,
) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM employees WHERE username = ? AND is_active = 1")
        .bind(username)
        .fetch_optional(ex)
        .await
}

pub async fn create(
    ex: impl SqliteExecutor<'_>,
    username: &str,
    name: &str,
    password_hash: &str,
) -> Result<Employee, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO employees (username, name, password_hash, created_at)
         VALUES (?, ?, ?, ?)
         RETURNING *",
    )
    .bind(username)
    .bind(name)
    .bind(password_hash)
    .bind(Utc::now())
    .fetch_one(ex)
    .await
}

/// Create the configured admin account on first boot. No-op when the
/// username already exists; an existing password is never overwritten.
pub async fn ensure_bootstrap_admin(
    pool: &sqlx::SqlitePool,
    username: &str,
    password: &str,
) -> anyhow::Result<()> {
    if find_by_username(pool, username).await?.is_some() {
        return Ok(());
    }
    let hash = hash_password(password).map_err(|e| anyhow::anyhow!(e))?;
    create(pool, username, "Administrador", &hash).await?;
    tracing::info!(username, "bootstrap admin created");
    Ok(())
}
