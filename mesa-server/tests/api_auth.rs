//! Router-level tests: auth middleware, role guard and route wiring.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use mesa_server::api;
use mesa_server::auth::create_token;
use mesa_server::db::{self, DbService};
use mesa_server::state::AppState;
use shared::models::UserRole;
use tower::ServiceExt;

const SECRET: &str = "test-secret";

async fn test_app() -> (Router, AppState) {
    let db = DbService::in_memory().await.unwrap();
    db::employees::ensure_bootstrap_admin(&db.pool, "admin", "admin123")
        .await
        .unwrap();
    let state = AppState {
        pool: db.pool,
        jwt_secret: SECRET.to_string(),
    };
    (api::create_router(state.clone()), state)
}

fn admin_token() -> String {
    create_token(1, "admin", "Administrador", UserRole::Admin, SECRET).unwrap()
}

fn customer_token() -> String {
    create_token(2, "cliente@example.com", "Cliente", UserRole::Customer, SECRET).unwrap()
}

fn get(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(path: &str, token: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_and_public_menu_are_open() {
    let (app, _) = test_app().await;

    let res = app.clone().oneshot(get("/health", None)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .oneshot(get("/api/restaurante/categorias", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_dashboard_requires_admin_token() {
    let (app, _) = test_app().await;

    let res = app
        .clone()
        .oneshot(get("/api/restaurante/pedidos", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app
        .clone()
        .oneshot(get("/api/restaurante/pedidos", Some(&customer_token())))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app
        .oneshot(get("/api/restaurante/pedidos", Some(&admin_token())))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_open_table_conflict_over_http() {
    let (app, _) = test_app().await;
    let token = admin_token();

    let res = app
        .clone()
        .oneshot(post_json(
            "/api/restaurante/mesas",
            &token,
            r#"{"table_number": 4}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .oneshot(post_json(
            "/api/restaurante/mesas",
            &token,
            r#"{"table_number": 4}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_employee_login_issues_admin_token() {
    let (app, _) = test_app().await;

    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"email": "admin", "password": "admin123"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let (app, _) = test_app().await;

    let res = app
        .oneshot(get("/api/restaurante/pedidos", Some("not-a-jwt")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
