use shared::models::{StoreInfo, StoreInfoUpdate};
use sqlx::SqliteExecutor;

/// The single store_info row is created by migration 0002.
pub async fn get(ex: impl SqliteExecutor<'_>) -> Result<StoreInfo, sqlx::Error> {
    sqlx::query_as("SELECT * FROM store_info WHERE id = 1")
        .fetch_one(ex)
        .await
}

pub async fn update(
    ex: impl SqliteExecutor<'_>,
    existing: &StoreInfo,
    data: StoreInfoUpdate,
) -> Result<StoreInfo, sqlx::Error> {
    let name = data.name.unwrap_or_else(|| existing.name.clone());
    let address = data.address.or_else(|| existing.address.clone());
    let phone = data.phone.or_else(|| existing.phone.clone());
    let tax_id = data.tax_id.or_else(|| existing.tax_id.clone());
    let delivery_fee = data.delivery_fee.unwrap_or(existing.delivery_fee);

    sqlx::query_as(
        "UPDATE store_info
         SET name = ?, address = ?, phone = ?, tax_id = ?, delivery_fee = ?
         WHERE id = 1
         RETURNING *",
    )
    .bind(name)
    .bind(address)
    .bind(phone)
    .bind(tax_id)
    .bind(delivery_fee)
    .fetch_one(ex)
    .await
}
