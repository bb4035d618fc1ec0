#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use storefront_api::config::{LogFormat, ServerConfig};
use storefront_api::router::build_app_router;
use storefront_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        db_max_connections: 5,
        log_format: LogFormat::Pretty,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Same builder as production.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// POST and return the `data.id` of the created resource.
pub async fn create_id(app: Router, uri: &str, body: Value) -> i64 {
    let response = post_json(app, uri, body).await;
    assert_eq!(
        response.status(),
        axum::http::StatusCode::CREATED,
        "POST {uri} failed"
    );
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a brand, a product type and an active product; returns the product id.
pub async fn seed_product(pool: &PgPool, slug: &str) -> i64 {
    let brand_id = create_id(
        build_test_app(pool.clone()),
        "/api/v1/brands",
        serde_json::json!({ "name": format!("brand-{slug}"), "is_active": true }),
    )
    .await;
    let type_id = create_id(
        build_test_app(pool.clone()),
        "/api/v1/product-types",
        serde_json::json!({ "name": format!("type-{slug}") }),
    )
    .await;
    create_id(
        build_test_app(pool.clone()),
        "/api/v1/products",
        serde_json::json!({
            "name": format!("Product {slug}"),
            "slug": slug,
            "brand_id": brand_id,
            "product_type_id": type_id,
            "is_active": true,
        }),
    )
    .await
}
