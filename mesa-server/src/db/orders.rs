//! Row-level order queries. State-machine rules live in the
//! `orders::actions` layer; this module only reads and writes rows.

use chrono::Utc;
use shared::models::{Order, OrderItem, OrderKind, OrderStatus, SettlementKind};
use sqlx::SqliteExecutor;

pub async fn find_by_id(
    ex: impl SqliteExecutor<'_>,
    id: i64,
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM orders WHERE id = ?")
        .bind(id)
        .fetch_optional(ex)
        .await
}

/// All unsettled orders, oldest first. This is the dashboard/KDS feed.
pub async fn find_open(ex: impl SqliteExecutor<'_>) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM orders WHERE settled = 0 ORDER BY opened_at, id")
        .fetch_all(ex)
        .await
}

pub async fn find_open_by_table(
    ex: impl SqliteExecutor<'_>,
    table_number: i64,
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM orders WHERE settled = 0 AND table_number = ?")
        .bind(table_number)
        .fetch_optional(ex)
        .await
}

/// Insert a dine-in order in `NOVO`. The partial unique index on
/// `table_number` raises a unique violation when the table is occupied.
pub async fn insert_table_order(
    ex: impl SqliteExecutor<'_>,
    table_number: i64,
) -> Result<Order, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO orders (kind, table_number, status, opened_at)
         VALUES (?, ?, ?, ?)
         RETURNING *",
    )
    .bind(OrderKind::Table)
    .bind(table_number)
    .bind(OrderStatus::Novo)
    .bind(Utc::now())
    .fetch_one(ex)
    .await
}

pub async fn insert_delivery_order(
    ex: impl SqliteExecutor<'_>,
    customer_id: Option<i64>,
    delivery_address: &str,
    delivery_fee: f64,
) -> Result<Order, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO orders (kind, customer_id, delivery_address, status, opened_at, delivery_fee)
         VALUES (?, ?, ?, ?, ?, ?)
         RETURNING *",
    )
    .bind(OrderKind::Delivery)
    .bind(customer_id)
    .bind(delivery_address)
    .bind(OrderStatus::Novo)
    .bind(Utc::now())
    .bind(delivery_fee)
    .fetch_one(ex)
    .await
}

pub async fn update_status(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    status: OrderStatus,
) -> Result<Order, sqlx::Error> {
    sqlx::query_as("UPDATE orders SET status = ? WHERE id = ? RETURNING *")
        .bind(status)
        .bind(id)
        .fetch_one(ex)
        .await
}

pub async fn update_table_number(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    table_number: i64,
) -> Result<Order, sqlx::Error> {
    sqlx::query_as("UPDATE orders SET table_number = ? WHERE id = ? RETURNING *")
        .bind(table_number)
        .bind(id)
        .fetch_one(ex)
        .await
}

pub async fn update_totals(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    subtotal: f64,
    total: f64,
) -> Result<Order, sqlx::Error> {
    sqlx::query_as("UPDATE orders SET subtotal = ?, total = ? WHERE id = ? RETURNING *")
        .bind(subtotal)
        .bind(total)
        .bind(id)
        .fetch_one(ex)
        .await
}

/// Close the order. Conditional on `settled = 0` so a double settle is a
/// detectable no-op instead of a second ledger-visible close.
pub async fn settle(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    settlement: SettlementKind,
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE orders
         SET settled = 1, settlement = ?, status = ?, closed_at = ?
         WHERE id = ? AND settled = 0
         RETURNING *",
    )
    .bind(settlement)
    .bind(OrderStatus::Finalizado)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(ex)
    .await
}

// ==================== Line items ====================

pub async fn find_items(
    ex: impl SqliteExecutor<'_>,
    order_id: i64,
) -> Result<Vec<OrderItem>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM order_items WHERE order_id = ? ORDER BY id")
        .bind(order_id)
        .fetch_all(ex)
        .await
}

pub async fn find_item(
    ex: impl SqliteExecutor<'_>,
    order_id: i64,
    item_id: i64,
) -> Result<Option<OrderItem>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM order_items WHERE id = ? AND order_id = ?")
        .bind(item_id)
        .bind(order_id)
        .fetch_optional(ex)
        .await
}

pub async fn insert_item(
    ex: impl SqliteExecutor<'_>,
    order_id: i64,
    product_id: i64,
    description: &str,
    quantity: i64,
    unit_price: f64,
    total: f64,
    note: Option<&str>,
) -> Result<OrderItem, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO order_items (order_id, product_id, description, quantity, unit_price, total, note)
         VALUES (?, ?, ?, ?, ?, ?, ?)
         RETURNING *",
    )
    .bind(order_id)
    .bind(product_id)
    .bind(description)
    .bind(quantity)
    .bind(unit_price)
    .bind(total)
    .bind(note)
    .fetch_one(ex)
    .await
}

pub async fn update_item_quantity(
    ex: impl SqliteExecutor<'_>,
    item_id: i64,
    quantity: i64,
    total: f64,
) -> Result<OrderItem, sqlx::Error> {
    sqlx::query_as("UPDATE order_items SET quantity = ?, total = ? WHERE id = ? RETURNING *")
        .bind(quantity)
        .bind(total)
        .bind(item_id)
        .fetch_one(ex)
        .await
}

pub async fn delete_item(ex: impl SqliteExecutor<'_>, item_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM order_items WHERE id = ?")
        .bind(item_id)
        .execute(ex)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Re-point every item of `origin` at `dest`. Used by the merge action.
pub async fn move_items(
    ex: impl SqliteExecutor<'_>,
    origin_id: i64,
    dest_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE order_items SET order_id = ? WHERE order_id = ?")
        .bind(dest_id)
        .bind(origin_id)
        .execute(ex)
        .await?;
    Ok(result.rows_affected())
}
