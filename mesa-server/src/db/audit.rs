use chrono::Utc;
use shared::models::OrderAuditEntry;
use sqlx::SqliteExecutor;

/// Append one audit line for an order. Entries are immutable.
pub async fn append(
    ex: impl SqliteExecutor<'_>,
    order_id: i64,
    entry: &str,
) -> Result<OrderAuditEntry, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO order_audit (order_id, entry, created_at)
         VALUES (?, ?, ?)
         RETURNING *",
    )
    .bind(order_id)
    .bind(entry)
    .bind(Utc::now())
    .fetch_one(ex)
    .await
}

pub async fn find_by_order(
    ex: impl SqliteExecutor<'_>,
    order_id: i64,
) -> Result<Vec<OrderAuditEntry>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM order_audit WHERE order_id = ? ORDER BY id")
        .bind(order_id)
        .fetch_all(ex)
        .await
}
