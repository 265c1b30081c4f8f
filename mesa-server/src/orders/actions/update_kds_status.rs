//! Kitchen-display status updates.

use shared::models::{Order, OrderStatus};
use shared::{AppError, ErrorCode};
use sqlx::SqlitePool;
use tracing::info;

use crate::db;
use crate::error::ServiceResult;
use crate::orders::actions::{ensure_open, load_order};

/// Move an open order along the kitchen cycle
/// (`NOVO -> PREPARANDO -> PRONTO`).
///
/// Any of the four open states is accepted regardless of the current
/// one, so a mistakenly closed table can be pulled back from
/// `PAGAMENTO`. `FINALIZADO` can only be reached through the settle
/// actions.
pub async fn update_kds_status(
    pool: &SqlitePool,
    order_id: i64,
    status: OrderStatus,
) -> ServiceResult<Order> {
    if !status.is_kitchen_status() {
        return Err(AppError::new(ErrorCode::InvalidKitchenStatus)
            .with_detail("status", format!("{status:?}"))
            .into());
    }

    let mut tx = pool.begin().await?;

    let order = load_order(&mut *tx, order_id).await?;
    ensure_open(&order)?;
    if order.status == status {
        tx.commit().await?;
        return Ok(order);
    }

    let updated = db::orders::update_status(&mut *tx, order_id, status).await?;
    db::audit::append(
        &mut *tx,
        order_id,
        &format!("Status alterado: {} -> {}", order.status.as_str(), status.as_str()),
    )
    .await?;
    tx.commit().await?;

    info!(order_id, from = ?order.status, to = ?status, "order status updated");
    Ok(updated)
}
