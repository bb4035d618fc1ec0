use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the catalog database answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub db_pool: PoolUsage,
}

/// Connection usage of the catalog pool against `DB_MAX_CONNECTIONS`.
#[derive(Serialize)]
pub struct PoolUsage {
    pub open: u32,
    pub idle: usize,
    pub max: u32,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = storefront_db::health_check(&state.pool).await.is_ok();
    if !db_healthy {
        tracing::warn!("Catalog database health check failed");
    }

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        db_pool: PoolUsage {
            open: state.pool.size(),
            idle: state.pool.num_idle(),
            max: state.config.db_max_connections,
        },
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
