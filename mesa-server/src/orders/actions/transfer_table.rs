//! Transfer an order to another table.

use shared::models::{Order, OrderKind};
use shared::{AppError, ErrorCode};
use sqlx::SqlitePool;
use tracing::info;

use crate::db::{self, is_unique_violation};
use crate::error::ServiceResult;
use crate::orders::actions::{ensure_open, load_order};

/// Move a dine-in order to a different table number. The destination
/// must be free; the unique index backstops the pre-check under
/// concurrency.
pub async fn transfer_table(
    pool: &SqlitePool,
    order_id: i64,
    table_number: i64,
) -> ServiceResult<Order> {
    if table_number <= 0 {
        return Err(AppError::validation(format!(
            "table_number must be positive, got {table_number}"
        ))
        .into());
    }

    let mut tx = pool.begin().await?;

    let order = load_order(&mut *tx, order_id).await?;
    ensure_open(&order)?;
    if order.kind != OrderKind::Table {
        return Err(AppError::invalid_request("only dine-in orders can change table").into());
    }
    if order.table_number == Some(table_number) {
        tx.commit().await?;
        return Ok(order);
    }
    if db::orders::find_open_by_table(&mut *tx, table_number).await?.is_some() {
        return Err(AppError::new(ErrorCode::TableOccupied)
            .with_detail("table_number", table_number)
            .into());
    }

    let origin = order.table_number.unwrap_or_default();
    let updated = match db::orders::update_table_number(&mut *tx, order_id, table_number).await {
        Ok(order) => order,
        Err(e) if is_unique_violation(&e) => {
            return Err(AppError::new(ErrorCode::TableOccupied)
                .with_detail("table_number", table_number)
                .into());
        }
        Err(e) => return Err(e.into()),
    };
    db::audit::append(
        &mut *tx,
        order_id,
        &format!("Transferido da mesa {origin} para a mesa {table_number}"),
    )
    .await?;
    tx.commit().await?;

    info!(order_id, from = origin, to = table_number, "order transferred");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::orders::actions::open_table;
    use crate::orders::actions::test_support::test_pool;

    #[tokio::test]
    async fn test_transfer_to_free_table() {
        let pool = test_pool().await;
        let order = open_table(&pool, 1).await.unwrap();

        let moved = transfer_table(&pool, order.id, 7).await.unwrap();
        assert_eq!(moved.table_number, Some(7));

        // Table 1 is free again
        assert!(open_table(&pool, 1).await.is_ok());
    }

    #[tokio::test]
    async fn test_transfer_to_occupied_table_fails() {
        let pool = test_pool().await;
        let order = open_table(&pool, 1).await.unwrap();
        open_table(&pool, 2).await.unwrap();

        let err = transfer_table(&pool, order.id, 2).await.unwrap_err();
        match err {
            ServiceError::App(e) => assert_eq!(e.code, ErrorCode::TableOccupied),
            other => panic!("expected TableOccupied, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transfer_to_same_table_is_noop() {
        let pool = test_pool().await;
        let order = open_table(&pool, 1).await.unwrap();

        let same = transfer_table(&pool, order.id, 1).await.unwrap();
        assert_eq!(same.table_number, Some(1));
    }
}
