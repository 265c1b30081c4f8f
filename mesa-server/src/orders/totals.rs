//! Order totals recomputation.

use rust_decimal::Decimal;
use shared::models::Order;
use sqlx::SqliteConnection;

use crate::db;
use crate::orders::money::{to_decimal, to_f64};

/// Recompute `subtotal` and `total` from the current line items and
/// persist them. Called inside the same transaction as the mutation that
/// changed the items, so readers never see stale totals.
pub async fn recompute(conn: &mut SqliteConnection, order_id: i64) -> Result<Order, sqlx::Error> {
    let items = db::orders::find_items(&mut *conn, order_id).await?;
    let (delivery_fee,): (f64,) =
        sqlx::query_as("SELECT delivery_fee FROM orders WHERE id = ?")
            .bind(order_id)
            .fetch_one(&mut *conn)
            .await?;

    let subtotal: Decimal = items.iter().map(|i| to_decimal(i.total)).sum();
    let total = subtotal + to_decimal(delivery_fee);

    db::orders::update_totals(&mut *conn, order_id, to_f64(subtotal), to_f64(total)).await
}
