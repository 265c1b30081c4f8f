//! Remove a line item from an open order.

use shared::models::{OrderDetail, OrderStatus};
use shared::{AppError, ErrorCode};
use sqlx::SqlitePool;
use tracing::info;

use crate::db;
use crate::error::ServiceResult;
use crate::orders::actions::{ensure_open, load_detail, load_order};
use crate::orders::totals;

pub async fn remove_item(
    pool: &SqlitePool,
    order_id: i64,
    item_id: i64,
) -> ServiceResult<OrderDetail> {
    let mut tx = pool.begin().await?;

    let order = load_order(&mut *tx, order_id).await?;
    ensure_open(&order)?;
    if order.status == OrderStatus::Pagamento {
        return Err(AppError::new(ErrorCode::OrderLockedForPayment)
            .with_detail("order_id", order_id)
            .into());
    }

    let item = db::orders::find_item(&mut *tx, order_id, item_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderItemNotFound).with_detail("item_id", item_id))?;

    db::orders::delete_item(&mut *tx, item_id).await?;
    db::audit::append(
        &mut *tx,
        order_id,
        &format!("Item removido: {}x {}", item.quantity, item.description),
    )
    .await?;
    let order = totals::recompute(&mut *tx, order_id).await?;
    let detail = load_detail(&mut *tx, order).await?;
    tx.commit().await?;

    info!(order_id, item_id, total = detail.order.total, "item removed");
    Ok(detail)
}
