//! Merge one table's order into another.

use shared::models::{Order, OrderKind, OrderStatus, SettlementKind};
use shared::{AppError, ErrorCode};
use sqlx::SqlitePool;
use tracing::info;

use crate::db;
use crate::error::ServiceResult;
use crate::orders::actions::{ensure_open, load_order};
use crate::orders::totals;

/// Move every item of `origin_id` into `dest_id`, recompute the
/// destination and close the origin as `MERGED` with zeroed totals. The
/// origin's table frees up immediately (settled orders leave the unique
/// index).
pub async fn merge_tables(
    pool: &SqlitePool,
    origin_id: i64,
    dest_id: i64,
) -> ServiceResult<Order> {
    if origin_id == dest_id {
        return Err(AppError::new(ErrorCode::MergeIntoSelf)
            .with_detail("order_id", origin_id)
            .into());
    }

    let mut tx = pool.begin().await?;

    let origin = load_order(&mut *tx, origin_id).await?;
    let dest = load_order(&mut *tx, dest_id).await?;
    ensure_open(&origin)?;
    ensure_open(&dest)?;
    if origin.kind != OrderKind::Table || dest.kind != OrderKind::Table {
        return Err(AppError::invalid_request("only dine-in orders can be merged").into());
    }
    if dest.status == OrderStatus::Pagamento || origin.status == OrderStatus::Pagamento {
        return Err(AppError::with_message(
            ErrorCode::OrderLockedForPayment,
            "orders awaiting payment cannot be merged",
        )
        .into());
    }

    let moved = db::orders::move_items(&mut *tx, origin_id, dest_id).await?;
    db::orders::update_totals(&mut *tx, origin_id, 0.0, 0.0).await?;
    db::orders::settle(&mut *tx, origin_id, SettlementKind::Merged).await?;

    let origin_table = origin.table_number.unwrap_or_default();
    let dest_table = dest.table_number.unwrap_or_default();
    db::audit::append(
        &mut *tx,
        origin_id,
        &format!("Mesa {origin_table} unificada na mesa {dest_table}"),
    )
    .await?;
    db::audit::append(
        &mut *tx,
        dest_id,
        &format!("Recebeu {moved} itens da mesa {origin_table}"),
    )
    .await?;

    let dest = totals::recompute(&mut *tx, dest_id).await?;
    tx.commit().await?;

    info!(origin_id, dest_id, moved, total = dest.total, "tables merged");
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::orders::actions::test_support::{item, seed_products, test_pool};
    use crate::orders::actions::{add_items, open_table, request_close};

    #[tokio::test]
    async fn test_merge_moves_items_and_frees_table() {
        let pool = test_pool().await;
        let (prato, suco) = seed_products(&pool).await;
        let origin = open_table(&pool, 1).await.unwrap();
        let dest = open_table(&pool, 2).await.unwrap();
        add_items(&pool, origin.id, vec![item(&prato, 2)]).await.unwrap();
        add_items(&pool, dest.id, vec![item(&suco, 1)]).await.unwrap();

        let merged = merge_tables(&pool, origin.id, dest.id).await.unwrap();

        assert_eq!(merged.id, dest.id);
        assert_eq!(merged.subtotal, 33.00);
        let items = db::orders::find_items(&pool, dest.id).await.unwrap();
        assert_eq!(items.len(), 2);

        let origin = db::orders::find_by_id(&pool, origin.id).await.unwrap().unwrap();
        assert!(origin.settled);
        assert_eq!(origin.settlement, Some(SettlementKind::Merged));
        assert_eq!(origin.total, 0.0);
        assert!(db::orders::find_items(&pool, origin.id).await.unwrap().is_empty());

        // Origin table can be reopened
        assert!(open_table(&pool, 1).await.is_ok());
    }

    #[tokio::test]
    async fn test_merge_into_self_rejected() {
        let pool = test_pool().await;
        let order = open_table(&pool, 1).await.unwrap();

        let err = merge_tables(&pool, order.id, order.id).await.unwrap_err();
        match err {
            ServiceError::App(e) => assert_eq!(e.code, ErrorCode::MergeIntoSelf),
            other => panic!("expected MergeIntoSelf, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_merge_refused_when_dest_locked() {
        let pool = test_pool().await;
        let (prato, _) = seed_products(&pool).await;
        let origin = open_table(&pool, 1).await.unwrap();
        let dest = open_table(&pool, 2).await.unwrap();
        add_items(&pool, dest.id, vec![item(&prato, 1)]).await.unwrap();
        request_close(&pool, dest.id).await.unwrap();

        let err = merge_tables(&pool, origin.id, dest.id).await.unwrap_err();
        match err {
            ServiceError::App(e) => assert_eq!(e.code, ErrorCode::OrderLockedForPayment),
            other => panic!("expected OrderLockedForPayment, got {other:?}"),
        }
    }
}
