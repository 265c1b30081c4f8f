use chrono::Utc;
use shared::models::SplitPayment;
use sqlx::SqliteExecutor;

pub async fn find_by_order(
    ex: impl SqliteExecutor<'_>,
    order_id: i64,
) -> Result<Vec<SplitPayment>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM order_payments WHERE order_id = ? ORDER BY id")
        .bind(order_id)
        .fetch_all(ex)
        .await
}

pub async fn insert(
    ex: impl SqliteExecutor<'_>,
    order_id: i64,
    payer_number: i64,
    payer_name: Option<&str>,
    amount: f64,
    method: &str,
) -> Result<SplitPayment, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO order_payments (order_id, payer_number, payer_name, amount, method, paid_at)
         VALUES (?, ?, ?, ?, ?, ?)
         RETURNING *",
    )
    .bind(order_id)
    .bind(payer_number)
    .bind(payer_name)
    .bind(amount)
    .bind(method)
    .bind(Utc::now())
    .fetch_one(ex)
    .await
}

pub async fn sum_by_order(
    ex: impl SqliteExecutor<'_>,
    order_id: i64,
) -> Result<f64, sqlx::Error> {
    // SUM over zero rows yields integer 0; TOTAL always returns REAL.
    let (sum,): (f64,) = sqlx::query_as("SELECT TOTAL(amount) FROM order_payments WHERE order_id = ?")
        .bind(order_id)
        .fetch_one(ex)
        .await?;
    Ok(sum)
}
