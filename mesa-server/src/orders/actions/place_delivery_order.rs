//! Place a delivery order (virtual store / phone intake).

use shared::models::{NewOrderItem, OrderDetail};
use shared::{AppError, ErrorCode};
use sqlx::SqlitePool;
use tracing::info;

use crate::db;
use crate::error::ServiceResult;
use crate::orders::actions::load_detail;
use crate::orders::money;
use crate::orders::totals;

/// Create a `D` order with its items in one transaction. The store's
/// flat delivery fee is snapshotted onto the order at creation, so a
/// later fee change never retroactively reprices an open order.
pub async fn place_delivery_order(
    pool: &SqlitePool,
    customer_id: Option<i64>,
    delivery_address: &str,
    items: Vec<NewOrderItem>,
) -> ServiceResult<OrderDetail> {
    if items.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::OrderEmpty,
            "a delivery order needs at least one item",
        )
        .into());
    }
    let delivery_address = delivery_address.trim();
    if delivery_address.is_empty() {
        return Err(AppError::validation("delivery_address is required").into());
    }

    let mut tx = pool.begin().await?;

    let store = db::store_info::get(&mut *tx).await?;
    let order =
        db::orders::insert_delivery_order(&mut *tx, customer_id, delivery_address, store.delivery_fee)
            .await?;

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
            order.id,
            product.id,
            &product.name,
            item.quantity,
            product.price,
            total,
            item.note.as_deref(),
        )
        .await?;
    }

    db::audit::append(&mut *tx, order.id, "Pedido delivery criado").await?;
    let order = totals::recompute(&mut *tx, order.id).await?;
    let detail = load_detail(&mut *tx, order).await?;
    tx.commit().await?;

    info!(
        order_id = detail.order.id,
        customer_id,
        total = detail.order.total,
        "delivery order placed"
    );
    Ok(detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::orders::actions::test_support::{item, seed_products, test_pool};
    use shared::models::{OrderKind, OrderStatus, StoreInfoUpdate};

    #[tokio::test]
    async fn test_delivery_order_includes_fee() {
        let pool = test_pool().await;
        let (prato, _) = seed_products(&pool).await;

        let store = db::store_info::get(&pool).await.unwrap();
        db::store_info::update(
            &pool,
            &store,
            StoreInfoUpdate {
                name: None,
                address: None,
                phone: None,
                tax_id: None,
                delivery_fee: Some(5.00),
            },
        )
        .await
        .unwrap();

        let detail = place_delivery_order(&pool, None, "Rua A, 123", vec![item(&prato, 2)])
            .await
            .unwrap();

        assert_eq!(detail.order.kind, OrderKind::Delivery);
        assert_eq!(detail.order.status, OrderStatus::Novo);
        assert_eq!(detail.order.table_number, None);
        assert_eq!(detail.order.subtotal, 25.00);
        assert_eq!(detail.order.delivery_fee, 5.00);
        assert_eq!(detail.order.total, 30.00);
    }

    #[tokio::test]
    async fn test_delivery_fee_snapshot_is_stable() {
        let pool = test_pool().await;
        let (prato, _) = seed_products(&pool).await;

        let detail = place_delivery_order(&pool, None, "Rua A, 123", vec![item(&prato, 1)])
            .await
            .unwrap();
        assert_eq!(detail.order.delivery_fee, 0.0);

        // Raising the fee afterwards must not touch the open order
        let store = db::store_info::get(&pool).await.unwrap();
        db::store_info::update(
            &pool,
            &store,
            StoreInfoUpdate {
                name: None,
                address: None,
                phone: None,
                tax_id: None,
                delivery_fee: Some(9.00),
            },
        )
        .await
        .unwrap();

        let order = db::orders::find_by_id(&pool, detail.order.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(order.delivery_fee, 0.0);
        assert_eq!(order.total, 12.50);
    }

    #[tokio::test]
    async fn test_delivery_requires_address_and_items() {
        let pool = test_pool().await;
        let (prato, _) = seed_products(&pool).await;

        let err = place_delivery_order(&pool, None, "   ", vec![item(&prato, 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::App(_)));

        let err = place_delivery_order(&pool, None, "Rua A, 123", vec![])
            .await
            .unwrap_err();
        match err {
            ServiceError::App(e) => assert_eq!(e.code, ErrorCode::OrderEmpty),
            other => panic!("expected OrderEmpty, got {other:?}"),
        }
    }
}
