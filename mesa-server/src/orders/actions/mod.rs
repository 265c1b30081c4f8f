//! Order state transitions.
//!
//! One file per action. Every action opens its own transaction on the
//! pool, re-reads the order inside it, enforces the lifecycle guards and
//! commits; callers never see a half-applied transition.

mod add_items;
mod edit_item_quantity;
mod finalize_order;
mod finalize_split_order;
mod merge_tables;
mod open_table;
mod place_delivery_order;
mod register_split_payment;
mod remove_item;
mod request_close;
mod settle_at_register;
mod transfer_table;
mod update_kds_status;

pub use add_items::add_items;
pub use edit_item_quantity::edit_item_quantity;
pub use finalize_order::finalize_order;
pub use finalize_split_order::finalize_split_order;
pub use merge_tables::merge_tables;
pub use open_table::open_table;
pub use place_delivery_order::place_delivery_order;
pub use register_split_payment::{register_split_payments, split_status};
pub use remove_item::remove_item;
pub use request_close::request_close;
pub use settle_at_register::settle_at_register;
pub use transfer_table::transfer_table;
pub use update_kds_status::update_kds_status;

use shared::models::{Order, OrderDetail};
use sqlx::SqliteConnection;

use crate::db;
use crate::error::ServiceResult;
use shared::{AppError, ErrorCode};

/// Load an order inside the current transaction or fail with 4001.
pub(crate) async fn load_order(
    conn: &mut SqliteConnection,
    order_id: i64,
) -> ServiceResult<Order> {
    db::orders::find_by_id(&mut *conn, order_id)
        .await?
        .ok_or_else(|| AppError::order_not_found(order_id).into())
}

/// Guard: the order must not be settled yet.
pub(crate) fn ensure_open(order: &Order) -> ServiceResult<()> {
    if order.settled {
        return Err(AppError::new(ErrorCode::OrderAlreadySettled)
            .with_detail("order_id", order.id)
            .into());
    }
    Ok(())
}

pub(crate) async fn load_detail(
    conn: &mut SqliteConnection,
    order: Order,
) -> ServiceResult<OrderDetail> {
    let items = db::orders::find_items(&mut *conn, order.id).await?;
    Ok(OrderDetail { order, items })
}

#[cfg(test)]
pub(crate) mod test_support {
    use shared::models::{CategoryCreate, NewOrderItem, Product, ProductCreate};
    use sqlx::SqlitePool;

    use crate::db::{self, DbService};

    pub async fn test_pool() -> SqlitePool {
        DbService::in_memory().await.unwrap().pool
    }

    /// Seed one category with two products (12.50 and 8.00).
    pub async fn seed_products(pool: &SqlitePool) -> (Product, Product) {
        let category = db::categories::create(
            pool,
            CategoryCreate {
                name: "Pratos".to_string(),
                display_order: Some(1),
            },
        )
        .await
        .unwrap();

        let prato = db::products::create(
            pool,
            ProductCreate {
                category_id: category.id,
                name: "Prato feito".to_string(),
                description: Some("Prato do dia".to_string()),
                price: 12.50,
            },
        )
        .await
        .unwrap();

        let suco = db::products::create(
            pool,
            ProductCreate {
                category_id: category.id,
                name: "Suco de laranja".to_string(),
                description: None,
                price: 8.00,
            },
        )
        .await
        .unwrap();

        (prato, suco)
    }

    pub fn item(product: &Product, quantity: i64) -> NewOrderItem {
        NewOrderItem {
            product_id: product.id,
            quantity,
            note: None,
        }
    }
}
