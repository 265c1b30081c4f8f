use shared::models::{Product, ProductCreate, ProductUpdate};
use sqlx::SqliteExecutor;

pub async fn find_all(ex: impl SqliteExecutor<'_>) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM products WHERE is_active = 1 ORDER BY name")
        .fetch_all(ex)
        .await
}

pub async fn find_by_category(
    ex: impl SqliteExecutor<'_>,
    category_id: i64,
) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM products WHERE category_id = ? AND is_active = 1 ORDER BY name")
        .bind(category_id)
        .fetch_all(ex)
        .await
}

pub async fn find_by_id(
    ex: impl SqliteExecutor<'_>,
    id: i64,
) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM products WHERE id = ?")
        .bind(id)
        .fetch_optional(ex)
        .await
}

pub async fn create(
    ex: impl SqliteExecutor<'_>,
    data: ProductCreate,
) -> Result<Product, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO products (category_id, name, description, price)
         VALUES (?, ?, ?, ?)
         RETURNING *",
    )
    .bind(data.category_id)
    .bind(data.name)
    .bind(data.description)
    .bind(data.price)
    .fetch_one(ex)
    .await
}

pub async fn update(
    ex: impl SqliteExecutor<'_>,
    existing: &Product,
    data: ProductUpdate,
) -> Result<Product, sqlx::Error> {
    let category_id = data.category_id.unwrap_or(existing.category_id);
    let name = data.name.unwrap_or_else(|| existing.name.clone());
    let description = data.description.or_else(|| existing.description.clone());
    let price = data.price.unwrap_or(existing.price);
    let is_active = data.is_active.unwrap_or(existing.is_active);

    sqlx::query_as(
        "UPDATE products
         SET category_id = ?, name = ?, description = ?, price = ?, is_active = ?
         WHERE id = ?
         RETURNING *",
    )
    .bind(category_id)
    .bind(name)
    .bind(description)
    .bind(price)
    .bind(is_active)
    .bind(existing.id)
    .fetch_one(ex)
    .await
}

/// Soft delete — order items hold description/price snapshots, so history
/// is unaffected either way, but the FK stays valid.
pub async fn deactivate(ex: impl SqliteExecutor<'_>, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE products SET is_active = 0 WHERE id = ?")
        .bind(id)
        .execute(ex)
        .await?;
    Ok(result.rows_affected() > 0)
}
