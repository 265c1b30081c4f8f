//! Settle an order at the cash register.

use shared::models::{Order, OrderStatus, SettlementKind};
use shared::{AppError, ErrorCode};
use sqlx::SqlitePool;
use tracing::info;

use crate::db;
use crate::error::ServiceResult;
use crate::orders::actions::{ensure_open, load_order};

/// Close an order in `PAGAMENTO` and write its cash-ledger row, both in
/// one transaction. The ledger credit is always the order total.
pub async fn settle_at_register(
    pool: &SqlitePool,
    order_id: i64,
    method: &str,
    operator: &str,
) -> ServiceResult<Order> {
    let method = method.trim();
    if method.is_empty() {
        return Err(AppError::new(ErrorCode::PaymentInvalidMethod).into());
    }

    let mut tx = pool.begin().await?;

    let order = load_order(&mut *tx, order_id).await?;
    ensure_open(&order)?;
    if order.status != OrderStatus::Pagamento {
        return Err(AppError::new(ErrorCode::OrderNotAwaitingPayment)
            .with_detail("status", order.status.as_str())
            .into());
    }

    db::cash_ledger::insert(&mut *tx, order_id, method, order.total, operator).await?;
    let settled = db::orders::settle(&mut *tx, order_id, SettlementKind::Register)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderAlreadySettled))?;
    db::audit::append(
        &mut *tx,
        order_id,
        &format!("Finalizado no caixa ({method}) por {operator}"),
    )
    .await?;
    tx.commit().await?;

    info!(order_id, method, operator, total = settled.total, "order settled at register");
    Ok(settled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::orders::actions::test_support::{item, seed_products, test_pool};
    use crate::orders::actions::{add_items, open_table, request_close};

    #[tokio::test]
    async fn test_settle_writes_ledger_row() {
        let pool = test_pool().await;
        let (prato, _) = seed_products(&pool).await;
        let order = open_table(&pool, 1).await.unwrap();
        add_items(&pool, order.id, vec![item(&prato, 2)]).await.unwrap();
        request_close(&pool, order.id).await.unwrap();

        let settled = settle_at_register(&pool, order.id, "DINHEIRO", "maria")
            .await
            .unwrap();

        assert!(settled.settled);
        assert_eq!(settled.status, OrderStatus::Finalizado);
        assert_eq!(settled.settlement, Some(SettlementKind::Register));
        assert!(settled.closed_at.is_some());

        let ledger = db::cash_ledger::find_all(&pool).await.unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].order_id, order.id);
        assert_eq!(ledger[0].amount, 25.00);
        assert_eq!(ledger[0].method, "DINHEIRO");
        assert_eq!(ledger[0].operator, "maria");
    }

    #[tokio::test]
    async fn test_settle_requires_pagamento() {
        let pool = test_pool().await;
        let (prato, _) = seed_products(&pool).await;
        let order = open_table(&pool, 1).await.unwrap();
        add_items(&pool, order.id, vec![item(&prato, 1)]).await.unwrap();

        let err = settle_at_register(&pool, order.id, "PIX", "maria")
            .await
            .unwrap_err();
        match err {
            ServiceError::App(e) => assert_eq!(e.code, ErrorCode::OrderNotAwaitingPayment),
            other => panic!("expected OrderNotAwaitingPayment, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_double_settle_rejected() {
        let pool = test_pool().await;
        let (prato, _) = seed_products(&pool).await;
        let order = open_table(&pool, 1).await.unwrap();
        add_items(&pool, order.id, vec![item(&prato, 1)]).await.unwrap();
        request_close(&pool, order.id).await.unwrap();
        settle_at_register(&pool, order.id, "PIX", "maria").await.unwrap();

        let err = settle_at_register(&pool, order.id, "PIX", "maria")
            .await
            .unwrap_err();
        match err {
            ServiceError::App(e) => assert_eq!(e.code, ErrorCode::OrderAlreadySettled),
            other => panic!("expected OrderAlreadySettled, got {other:?}"),
        }

        // Only one ledger row despite the second attempt
        let ledger = db::cash_ledger::find_all(&pool).await.unwrap();
        assert_eq!(ledger.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_method_rejected() {
        let pool = test_pool().await;
        let err = settle_at_register(&pool, 1, "  ", "maria").await.unwrap_err();
        match err {
            ServiceError::App(e) => assert_eq!(e.code, ErrorCode::PaymentInvalidMethod),
            other => panic!("expected PaymentInvalidMethod, got {other:?}"),
        }
    }
}
