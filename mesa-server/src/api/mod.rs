//! HTTP API — axum router and handlers, split by domain.
//!
//! Route paths and status tokens are the contract the existing dashboard
//! and menu clients poll; they stay in Portuguese even though the code
//! does not.

mod auth;
mod catalog;
mod health;
mod orders;
mod split;
mod tables;

use axum::routing::{get, post, put};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{auth_middleware, require_admin};
use crate::state::AppState;
use shared::AppError;

pub type ApiResult<T> = Result<axum::Json<T>, AppError>;

/// Build the full application router.
pub fn create_router(state: AppState) -> Router {
    // Customer menu and sign-up, no token required
    let public = Router::new()
        .route("/api/restaurante/empresa", get(catalog::get_store_info))
        .route("/api/restaurante/categorias", get(catalog::list_categories))
        .route("/api/restaurante/produtos", get(catalog::list_products))
        .route(
            "/api/restaurante/produtos/{id}",
            get(catalog::list_products_by_category),
        )
        .route("/api/auth/registrar", post(auth::register))
        .route("/api/auth/login", post(auth::login));

    // Any authenticated user (customers place delivery orders)
    let authenticated = Router::new()
        .route("/api/restaurante/pedidos/delivery", post(orders::place_delivery))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Staff dashboard, KDS and cashier
    let admin = Router::new()
        .route("/api/restaurante/empresa", put(catalog::update_store_info))
        .route("/api/restaurante/categorias", post(catalog::create_category))
        .route(
            "/api/restaurante/categorias/{id}",
            put(catalog::update_category).delete(catalog::delete_category),
        )
        .route("/api/restaurante/produtos", post(catalog::create_product))
        .route(
            "/api/restaurante/produtos/{id}",
            put(catalog::update_product).delete(catalog::delete_product),
        )
        .route("/api/restaurante/mesas", get(tables::board).post(tables::open))
        .route("/api/restaurante/pedidos", get(orders::list_open))
        .route("/api/restaurante/pedidos/{id}", get(orders::detail))
        .route("/api/restaurante/pedidos/{id}/itens", post(orders::add_items))
        .route(
            "/api/restaurante/pedidos/{id}/itens/{item_id}",
            put(orders::edit_item).delete(orders::remove_item),
        )
        .route("/api/restaurante/pedidos/{id}/status", put(orders::update_status))
        .route("/api/restaurante/pedidos/{id}/fechamento", post(orders::request_close))
        .route("/api/restaurante/pedidos/{id}/finalizar-nfce", post(orders::finalize_nfce))
        .route("/api/restaurante/pedidos/{id}/caixa", post(orders::settle_at_register))
        .route("/api/restaurante/pedidos/{id}/transferir", post(orders::transfer))
        .route("/api/restaurante/pedidos/juntar", post(orders::merge))
        .route(
            "/api/restaurante/pedidos/{id}/pagamentos",
            get(split::status).post(split::register),
        )
        .route(
            "/api/restaurante/pedidos/{id}/finalizar-dividido",
            post(split::finalize),
        )
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(public)
        .merge(authenticated)
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
