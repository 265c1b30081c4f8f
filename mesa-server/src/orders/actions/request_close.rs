//! Request the bill: move an order into `PAGAMENTO`.

use shared::models::{Order, OrderStatus};
use sqlx::SqlitePool;
use tracing::info;

use crate::db;
use crate::error::ServiceResult;
use crate::orders::actions::{ensure_open, load_order};

/// Lock the order for payment. From here on items can no longer be
/// added, edited or removed; the only ways out are the settle actions.
/// Calling it on an order already in `PAGAMENTO` is a no-op.
pub async fn request_close(pool: &SqlitePool, order_id: i64) -> ServiceResult<Order> {
    let mut tx = pool.begin().await?;

    let order = load_order(&mut *tx, order_id).await?;
    ensure_open(&order)?;
    if order.status == OrderStatus::Pagamento {
        tx.commit().await?;
        return Ok(order);
    }

    let updated = db::orders::update_status(&mut *tx, order_id, OrderStatus::Pagamento).await?;
    db::audit::append(&mut *tx, order_id, "Conta solicitada").await?;
    tx.commit().await?;

    info!(order_id, total = updated.total, "order locked for payment");
    Ok(updated)
}
