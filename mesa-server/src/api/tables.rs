//! Table board endpoints.

use axum::Json;
use axum::extract::State;
use shared::models::{OpenTableRequest, Order, OrderKind};

use super::ApiResult;
use crate::db;
use crate::error::ServiceError;
use crate::orders::actions;
use crate::state::AppState;

/// GET /api/restaurante/mesas — every open dine-in order, the dashboard
/// table board.
pub async fn board(State(state): State<AppState>) -> ApiResult<Vec<Order>> {
    let orders = db::orders::find_open(&state.pool)
        .await
        .map_err(ServiceError::from)?;
    Ok(Json(
        orders.into_iter().filter(|o| o.kind == OrderKind::Table).collect(),
    ))
}

/// POST /api/restaurante/mesas
pub async fn open(
    State(state): State<AppState>,
    Json(req): Json<OpenTableRequest>,
) -> ApiResult<Order> {
    let order = actions::open_table(&state.pool, req.table_number).await?;
    Ok(Json(order))
}
