//! Order endpoints: listing, items, status and settlement.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use shared::models::{
    AddItemsRequest, DeliveryOrderRequest, EditQuantityRequest, MergeTablesRequest, Order,
    OrderDetail, SettleRequest, TransferTableRequest, UpdateStatusRequest, UserRole,
};
use shared::AppError;

use super::ApiResult;
use crate::auth::Identity;
use crate::db;
use crate::error::ServiceError;
use crate::orders::actions;
use crate::state::AppState;

/// GET /api/restaurante/pedidos — all open orders (KDS feed)
pub async fn list_open(State(state): State<AppState>) -> ApiResult<Vec<Order>> {
    let orders = db::orders::find_open(&state.pool)
        .await
        .map_err(ServiceError::from)?;
    Ok(Json(orders))
}

/// GET /api/restaurante/pedidos/{id}
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<OrderDetail> {
    let order = db::orders::find_by_id(&state.pool, id)
        .await
        .map_err(ServiceError::from)?
        .ok_or_else(|| AppError::order_not_found(id))?;
    let items = db::orders::find_items(&state.pool, id)
        .await
        .map_err(ServiceError::from)?;
    Ok(Json(OrderDetail { order, items }))
}

/// POST /api/restaurante/pedidos/delivery
///
/// Customers order for themselves; staff may place one on a customer's
/// behalf (no customer link recorded).
pub async fn place_delivery(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<DeliveryOrderRequest>,
) -> ApiResult<OrderDetail> {
    let customer_id = match identity.role {
        UserRole::Customer => Some(identity.id),
        UserRole::Admin => None,
    };
    let detail =
        actions::place_delivery_order(&state.pool, customer_id, &req.delivery_address, req.items)
            .await?;
    Ok(Json(detail))
}

/// POST /api/restaurante/pedidos/{id}/itens
pub async fn add_items(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<AddItemsRequest>,
) -> ApiResult<OrderDetail> {
    let detail = actions::add_items(&state.pool, id, req.items).await?;
    Ok(Json(detail))
}

/// PUT /api/restaurante/pedidos/{id}/itens/{item_id}
pub async fn edit_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(i64, i64)>,
    Json(req): Json<EditQuantityRequest>,
) -> ApiResult<OrderDetail> {
    let detail = actions::edit_item_quantity(&state.pool, id, item_id, req.quantity).await?;
    Ok(Json(detail))
}

/// DELETE /api/restaurante/pedidos/{id}/itens/{item_id}
pub async fn remove_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(i64, i64)>,
) -> ApiResult<OrderDetail> {
    let detail = actions::remove_item(&state.pool, id, item_id).await?;
    Ok(Json(detail))
}

/// PUT /api/restaurante/pedidos/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateStatusRequest>,
) -> ApiResult<Order> {
    let order = actions::update_kds_status(&state.pool, id, req.status).await?;
    Ok(Json(order))
}

/// POST /api/restaurante/pedidos/{id}/fechamento
pub async fn request_close(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Order> {
    let order = actions::request_close(&state.pool, id).await?;
    Ok(Json(order))
}

/// POST /api/restaurante/pedidos/{id}/finalizar-nfce
pub async fn finalize_nfce(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Order> {
    let order = actions::finalize_order(&state.pool, id).await?;
    Ok(Json(order))
}

/// POST /api/restaurante/pedidos/{id}/caixa
pub async fn settle_at_register(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
    Json(req): Json<SettleRequest>,
) -> ApiResult<Order> {
    let order =
        actions::settle_at_register(&state.pool, id, &req.method, &identity.name).await?;
    Ok(Json(order))
}

/// POST /api/restaurante/pedidos/{id}/transferir
pub async fn transfer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<TransferTableRequest>,
) -> ApiResult<Order> {
    let order = actions::transfer_table(&state.pool, id, req.table_number).await?;
    Ok(Json(order))
}

/// POST /api/restaurante/pedidos/juntar
pub async fn merge(
    State(state): State<AppState>,
    Json(req): Json<MergeTablesRequest>,
) -> ApiResult<Order> {
    let order = actions::merge_tables(&state.pool, req.origin_id, req.dest_id).await?;
    Ok(Json(order))
}
