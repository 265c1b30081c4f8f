//! Add line items to an open order.

use shared::models::{NewOrderItem, OrderDetail, OrderStatus};
use shared::{AppError, ErrorCode};
use sqlx::SqlitePool;
use tracing::info;

use crate::db;
use crate::error::ServiceResult;
use crate::orders::actions::{ensure_open, load_detail, load_order};
use crate::orders::money;
use crate::orders::totals;

/// Append items to an order. Description and unit price are snapshotted
/// from the product table at insert time.
///
/// Adding food re-fires the kitchen: an order already in `PREPARANDO` or
/// `PRONTO` goes back to `NOVO`, with an audit entry recording the reset.
/// Orders in `PAGAMENTO` are locked and refuse new items.
pub async fn add_items(
    pool: &SqlitePool,
    order_id: i64,
    items: Vec<NewOrderItem>,
) -> ServiceResult<OrderDetail> {
    if items.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::OrderEmpty,
            "at least one item is required",
        )
        .into());
    }

    let mut tx = pool.begin().await?;

    let order = load_order(&mut *tx, order_id).await?;
    ensure_open(&order)?;
    if order.status == OrderStatus::Pagamento {
        return Err(AppError::new(ErrorCode::OrderLockedForPayment)
            .with_detail("order_id", order_id)
            .into());
    }

    let mut added = 0i64;
    for item in &items {
        money::validate_quantity(item.quantity)?;

        let product = db::products::find_by_id(&mut *tx, item.product_id)
            .await?
            .filter(|p| p.is_active)
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::ProductNotFound,
                    format!("Product {} not found", item.product_id),
                )
            })?;

        let total = money::line_total(product.price, item.quantity);
        db::orders::insert_item(
            &mut *tx,
            order_id,
            product.id,
            &product.name,
            item.quantity,
            product.price,
            total,
            item.note.as_deref(),
        )
        .await?;
        added += item.quantity;

        db::audit::append(
            &mut *tx,
            order_id,
            &format!("Item adicionado: {}x {}", item.quantity, product.name),
        )
        .await?;
    }

    if order.status != OrderStatus::Novo {
        db::orders::update_status(&mut *tx, order_id, OrderStatus::Novo).await?;
        db::audit::append(&mut *tx, order_id, "Status retornado para NOVO (novos itens)").await?;
    }

    let order = totals::recompute(&mut *tx, order_id).await?;
    let detail = load_detail(&mut *tx, order).await?;
    tx.commit().await?;

    info!(order_id, added, total = detail.order.total, "items added");
    Ok(detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::orders::actions::open_table;
    use crate::orders::actions::test_support::{item, seed_products, test_pool};

    #[tokio::test]
    async fn test_add_items_snapshots_product_and_totals() {
        let pool = test_pool().await;
        let (prato, suco) = seed_products(&pool).await;
        let order = open_table(&pool, 1).await.unwrap();

        let detail = add_items(&pool, order.id, vec![item(&prato, 2), item(&suco, 1)])
            .await
            .unwrap();

        assert_eq!(detail.items.len(), 2);
        assert_eq!(detail.items[0].description, "Prato feito");
        assert_eq!(detail.items[0].unit_price, 12.50);
        assert_eq!(detail.items[0].total, 25.00);
        assert_eq!(detail.order.subtotal, 33.00);
        assert_eq!(detail.order.total, 33.00);
    }

    #[tokio::test]
    async fn test_add_items_resets_status_to_novo() {
        let pool = test_pool().await;
        let (prato, _) = seed_products(&pool).await;
        let order = open_table(&pool, 1).await.unwrap();
        add_items(&pool, order.id, vec![item(&prato, 1)]).await.unwrap();

        db::orders::update_status(&pool, order.id, OrderStatus::Pronto)
            .await
            .unwrap();

        let detail = add_items(&pool, order.id, vec![item(&prato, 1)]).await.unwrap();
        assert_eq!(detail.order.status, OrderStatus::Novo);
    }

    #[tokio::test]
    async fn test_add_items_rejects_locked_order() {
        let pool = test_pool().await;
        let (prato, _) = seed_products(&pool).await;
        let order = open_table(&pool, 1).await.unwrap();
        add_items(&pool, order.id, vec![item(&prato, 1)]).await.unwrap();

        db::orders::update_status(&pool, order.id, OrderStatus::Pagamento)
            .await
            .unwrap();

        let err = add_items(&pool, order.id, vec![item(&prato, 1)])
            .await
            .unwrap_err();
        match err {
            ServiceError::App(e) => assert_eq!(e.code, ErrorCode::OrderLockedForPayment),
            other => panic!("expected OrderLockedForPayment, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_add_items_rejects_empty_list() {
        let pool = test_pool().await;
        let order = open_table(&pool, 1).await.unwrap();

        let err = add_items(&pool, order.id, vec![]).await.unwrap_err();
        match err {
            ServiceError::App(e) => assert_eq!(e.code, ErrorCode::OrderEmpty),
            other => panic!("expected OrderEmpty, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_add_items_unknown_product() {
        let pool = test_pool().await;
        seed_products(&pool).await;
        let order = open_table(&pool, 1).await.unwrap();

        let err = add_items(
            &pool,
            order.id,
            vec![shared::models::NewOrderItem {
                product_id: 9999,
                quantity: 1,
                note: None,
            }],
        )
        .await
        .unwrap_err();
        match err {
            ServiceError::App(e) => assert_eq!(e.code, ErrorCode::ProductNotFound),
            other => panic!("expected ProductNotFound, got {other:?}"),
        }
    }
}
