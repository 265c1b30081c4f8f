//! Split-payment endpoints.

use axum::Json;
use axum::extract::{Path, State};
use shared::models::{Order, RegisterSplitPaymentsRequest, SplitStatus};

use super::ApiResult;
use crate::orders::actions;
use crate::state::AppState;

/// GET /api/restaurante/pedidos/{id}/pagamentos
pub async fn status(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<SplitStatus> {
    let status = actions::split_status(&state.pool, id).await?;
    Ok(Json(status))
}

/// POST /api/restaurante/pedidos/{id}/pagamentos
pub async fn register(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<RegisterSplitPaymentsRequest>,
) -> ApiResult<SplitStatus> {
    let status = actions::register_split_payments(&state.pool, id, req.payments).await?;
    Ok(Json(status))
}

/// POST /api/restaurante/pedidos/{id}/finalizar-dividido
pub async fn finalize(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Order> {
    let order = actions::finalize_split_order(&state.pool, id).await?;
    Ok(Json(order))
}
