//! Application router: catalog routes under `/api/v1`, `/health` at the
//! root, and the middleware stack shared by `main.rs` and the integration
//! tests.

use std::any::Any;
use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::routes;
use crate::state::AppState;

/// Header carrying the per-request id, set on the way in and echoed back.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the catalog [`Router`] with all middleware layers.
///
/// Layers run outermost first: CORS, request id, tracing, request-id
/// propagation, timeout, panic recovery. Unknown paths and handler panics
/// answer with the same JSON error body as [`AppError`].
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .fallback(unknown_route)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(build_cors_layer(config))
        .with_state(state)
}

async fn unknown_route(method: Method, uri: Uri) -> AppError {
    tracing::debug!(%method, %uri, "No route matched");
    AppError::Database(sqlx::Error::RowNotFound)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    AppError::InternalError(format!("handler panicked: {detail}")).into_response()
}

/// Build the CORS layer for the storefront frontends.
///
/// Browsers may read `x-request-id` so support requests can quote it.
/// Panics at startup if a configured origin is invalid.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
        .max_age(Duration::from_secs(3600))
}
