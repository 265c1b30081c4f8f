use shared::models::{Category, CategoryCreate, CategoryUpdate};
use sqlx::SqliteExecutor;

pub async fn find_all(ex: impl SqliteExecutor<'_>) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM categories WHERE is_active = 1 ORDER BY display_order, name")
        .fetch_all(ex)
        .await
}

pub async fn find_by_id(
    ex: impl SqliteExecutor<'_>,
    id: i64,
) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM categories WHERE id = ?")
        .bind(id)
        .fetch_optional(ex)
        .await
}

pub async fn create(
    ex: impl SqliteExecutor<'_>,
    data: CategoryCreate,
) -> Result<Category, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO categories (name, display_order) VALUES (?, ?) RETURNING *",
    )
    .bind(data.name)
    .bind(data.display_order.unwrap_or(0))
    .fetch_one(ex)
    .await
}

pub async fn update(
    ex: impl SqliteExecutor<'_>,
    existing: &Category,
    data: CategoryUpdate,
) -> Result<Category, sqlx::Error> {
    let name = data.name.unwrap_or_else(|| existing.name.clone());
    let display_order = data.display_order.unwrap_or(existing.display_order);
    let is_active = data.is_active.unwrap_or(existing.is_active);

    sqlx::query_as(
        "UPDATE categories SET name = ?, display_order = ?, is_active = ? WHERE id = ? RETURNING *",
    )
    .bind(name)
    .bind(display_order)
    .bind(is_active)
    .bind(existing.id)
    .fetch_one(ex)
    .await
}

/// Soft delete — products keep a valid FK and history stays queryable.
pub async fn deactivate(ex: impl SqliteExecutor<'_>, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE categories SET is_active = 0 WHERE id = ?")
        .bind(id)
        .execute(ex)
        .await?;
    Ok(result.rows_affected() > 0)
}
