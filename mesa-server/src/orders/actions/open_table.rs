//! Open a dine-in table.

use shared::models::Order;
use shared::{AppError, ErrorCode};
use sqlx::SqlitePool;
use tracing::info;

use crate::db::{self, is_unique_violation};
use crate::error::ServiceResult;

/// Create a new order in `NOVO` bound to a table.
///
/// Occupancy is not an application pre-check: the partial unique index on
/// open table numbers makes a concurrent double-open a constraint
/// violation, which we translate to `TableOccupied`.
pub async fn open_table(pool: &SqlitePool, table_number: i64) -> ServiceResult<Order> {
    if table_number <= 0 {
        return Err(AppError::validation(format!(
            "table_number must be positive, got {table_number}"
        ))
        .into());
    }

    let mut tx = pool.begin().await?;

    let order = match db::orders::insert_table_order(&mut *tx, table_number).await {
        Ok(order) => order,
        Err(e) if is_unique_violation(&e) => {
            return Err(AppError::new(ErrorCode::TableOccupied)
                .with_detail("table_number", table_number)
                .into());
        }
        Err(e) => return Err(e.into()),
    };

    db::audit::append(&mut *tx, order.id, &format!("Mesa {table_number} aberta")).await?;
    tx.commit().await?;

    info!(order_id = order.id, table_number, "table opened");
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::orders::actions::test_support::test_pool;
    use shared::models::{OrderKind, OrderStatus};

    #[tokio::test]
    async fn test_open_table_success() {
        let pool = test_pool().await;

        let order = open_table(&pool, 5).await.unwrap();

        assert_eq!(order.kind, OrderKind::Table);
        assert_eq!(order.table_number, Some(5));
        assert_eq!(order.status, OrderStatus::Novo);
        assert!(!order.settled);
        assert_eq!(order.total, 0.0);
    }

    #[tokio::test]
    async fn test_open_occupied_table_fails() {
        let pool = test_pool().await;

        open_table(&pool, 5).await.unwrap();
        let err = open_table(&pool, 5).await.unwrap_err();

        match err {
            ServiceError::App(e) => assert_eq!(e.code, ErrorCode::TableOccupied),
            other => panic!("expected TableOccupied, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_open_rejects_non_positive_table() {
        let pool = test_pool().await;

        assert!(open_table(&pool, 0).await.is_err());
        assert!(open_table(&pool, -3).await.is_err());
    }

    #[tokio::test]
    async fn test_table_reusable_after_settle() {
        let pool = test_pool().await;

        let order = open_table(&pool, 5).await.unwrap();
        db::orders::settle(&pool, order.id, shared::models::SettlementKind::Register)
            .await
            .unwrap();

        // Settled orders drop out of the unique index
        let reopened = open_table(&pool, 5).await.unwrap();
        assert_ne!(reopened.id, order.id);
    }
}
