use chrono::{DateTime, Utc};
use sqlx::SqliteExecutor;

/// Virtual-store customer row. The hash stays server-side.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Customer {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub async fn find_by_email(
    ex: impl SqliteExecutor<'_>,
    email: &str,
) -> Result<Option<Customer>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM customers WHERE email = ?")
        .bind(email)
        .fetch_optional(ex)
        .await
}

pub async fn create(
    ex: impl SqliteExecutor<'_>,
    email: &str,
    name: &str,
    password_hash: &str,
    phone: Option<&str>,
    address: Option<&str>,
) -> Result<Customer, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO customers (email, name, password_hash, phone, address, created_at)
         VALUES (?, ?, ?, ?, ?, ?)
         RETURNING *",
    )
    .bind(email)
    .bind(name)
    .bind(password_hash)
    .bind(phone)
    .bind(address)
    .bind(Utc::now())
    .fetch_one(ex)
    .await
}
