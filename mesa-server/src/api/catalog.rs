//! Catalog endpoints: store info, categories and products.

use axum::Json;
use axum::extract::{Path, State};
use shared::models::{
    Category, CategoryCreate, CategoryUpdate, Product, ProductCreate, ProductUpdate, StoreInfo,
    StoreInfoUpdate,
};
use shared::{AppError, ErrorCode};

use super::ApiResult;
use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;

/// GET /api/restaurante/empresa
pub async fn get_store_info(State(state): State<AppState>) -> ApiResult<StoreInfo> {
    let info = db::store_info::get(&state.pool)
        .await
        .map_err(ServiceError::from)?;
    Ok(Json(info))
}

/// PUT /api/restaurante/empresa
pub async fn update_store_info(
    State(state): State<AppState>,
    Json(req): Json<StoreInfoUpdate>,
) -> ApiResult<StoreInfo> {
    if let Some(fee) = req.delivery_fee {
        if !fee.is_finite() || fee < 0.0 {
            return Err(AppError::validation("delivery_fee must be a non-negative number"));
        }
    }
    let existing = db::store_info::get(&state.pool)
        .await
        .map_err(ServiceError::from)?;
    let updated = db::store_info::update(&state.pool, &existing, req)
        .await
        .map_err(ServiceError::from)?;
    Ok(Json(updated))
}

/// GET /api/restaurante/categorias
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Vec<Category>> {
    let categories = db::categories::find_all(&state.pool)
        .await
        .map_err(ServiceError::from)?;
    Ok(Json(categories))
}

/// POST /api/restaurante/categorias
pub async fn create_category(
    State(state): State<AppState>,
    Json(req): Json<CategoryCreate>,
) -> ApiResult<Category> {
    if req.name.trim().is_empty() {
        return Err(AppError::validation("name is required"));
    }
    let category = db::categories::create(&state.pool, req)
        .await
        .map_err(ServiceError::from)?;
    Ok(Json(category))
}

/// PUT /api/restaurante/categorias/{id}
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<CategoryUpdate>,
) -> ApiResult<Category> {
    let existing = db::categories::find_by_id(&state.pool, id)
        .await
        .map_err(ServiceError::from)?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;
    let updated = db::categories::update(&state.pool, &existing, req)
        .await
        .map_err(ServiceError::from)?;
    Ok(Json(updated))
}

/// DELETE /api/restaurante/categorias/{id} — deactivates, never deletes
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    let removed = db::categories::deactivate(&state.pool, id)
        .await
        .map_err(ServiceError::from)?;
    if !removed {
        return Err(AppError::new(ErrorCode::CategoryNotFound));
    }
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// GET /api/restaurante/produtos
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    let products = db::products::find_all(&state.pool)
        .await
        .map_err(ServiceError::from)?;
    Ok(Json(products))
}

/// GET /api/restaurante/produtos/{categoria_id}
pub async fn list_products_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> ApiResult<Vec<Product>> {
    let products = db::products::find_by_category(&state.pool, category_id)
        .await
        .map_err(ServiceError::from)?;
    Ok(Json(products))
}

/// POST /api/restaurante/produtos
pub async fn create_product(
    State(state): State<AppState>,
    Json(req): Json<ProductCreate>,
) -> ApiResult<Product> {
    validate_product(&req.name, req.price)?;
    db::categories::find_by_id(&state.pool, req.category_id)
        .await
        .map_err(ServiceError::from)?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;
    let product = db::products::create(&state.pool, req)
        .await
        .map_err(ServiceError::from)?;
    Ok(Json(product))
}

/// PUT /api/restaurante/produtos/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ProductUpdate>,
) -> ApiResult<Product> {
    if let Some(price) = req.price {
        if !price.is_finite() || price < 0.0 {
            return Err(AppError::validation("price must be a non-negative number"));
        }
    }
    let existing = db::products::find_by_id(&state.pool, id)
        .await
        .map_err(ServiceError::from)?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
    let updated = db::products::update(&state.pool, &existing, req)
        .await
        .map_err(ServiceError::from)?;
    Ok(Json(updated))
}

/// DELETE /api/restaurante/produtos/{id} — deactivates, never deletes
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    let removed = db::products::deactivate(&state.pool, id)
        .await
        .map_err(ServiceError::from)?;
    if !removed {
        return Err(AppError::new(ErrorCode::ProductNotFound));
    }
    Ok(Json(serde_json::json!({ "ok": true })))
}

fn validate_product(name: &str, price: f64) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation("name is required"));
    }
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::validation("price must be a non-negative number"));
    }
    Ok(())
}
