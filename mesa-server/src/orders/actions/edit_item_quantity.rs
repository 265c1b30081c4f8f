//! Edit the quantity of a line item.

use shared::models::{OrderDetail, OrderStatus};
use shared::{AppError, ErrorCode};
use sqlx::SqlitePool;
use tracing::info;

use crate::db;
use crate::error::ServiceResult;
use crate::orders::actions::{ensure_open, load_detail, load_order};
use crate::orders::money;
use crate::orders::totals;

/// Change a line's quantity, recomputing its total from the snapshotted
/// unit price. The guards mirror `remove_item`: open order, not locked.
pub async fn edit_item_quantity(
    pool: &SqlitePool,
    order_id: i64,
    item_id: i64,
    quantity: i64,
) -> ServiceResult<OrderDetail> {
    money::validate_quantity(quantity)?;

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

    let total = money::line_total(item.unit_price, quantity);
    db::orders::update_item_quantity(&mut *tx, item_id, quantity, total).await?;
    db::audit::append(
        &mut *tx,
        order_id,
        &format!(
            "Quantidade alterada: {} ({} -> {})",
            item.description, item.quantity, quantity
        ),
    )
    .await?;
    let order = totals::recompute(&mut *tx, order_id).await?;
    let detail = load_detail(&mut *tx, order).await?;
    tx.commit().await?;

    info!(order_id, item_id, quantity, "item quantity updated");
    Ok(detail)
}
