use chrono::Utc;
use shared::models::CashLedgerEntry;
use sqlx::SqliteExecutor;

/// Record a register settlement. One row per settled order; the ledger is
/// append-only.
pub async fn insert(
    ex: impl SqliteExecutor<'_>,
    order_id: i64,
    method: &str,
    amount: f64,
    operator: &str,
) -> Result<CashLedgerEntry, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO cash_ledger (order_id, method, amount, operator, recorded_at)
         VALUES (?, ?, ?, ?, ?)
         RETURNING *",
    )
    .bind(order_id)
    .bind(method)
    .bind(amount)
    .bind(operator)
    .bind(Utc::now())
    .fetch_one(ex)
    .await
}

pub async fn find_all(ex: impl SqliteExecutor<'_>) -> Result<Vec<CashLedgerEntry>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM cash_ledger ORDER BY id")
        .fetch_all(ex)
        .await
}
