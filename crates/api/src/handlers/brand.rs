//! Handlers for the `/brands` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use storefront_core::error::CoreError;
use storefront_core::types::DbId;
use storefront_db::models::brand::{CreateBrand, UpdateBrand};
use storefront_db::repositories::BrandRepo;

use super::validate_input;
use crate::error::{AppError, AppResult};
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/brands?include_inactive=false
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let brands = BrandRepo::list(&state.pool, params.include_inactive).await?;
    tracing::debug!(count = brands.len(), "Listed brands");
    Ok(Json(DataResponse { data: brands }))
}

/// POST /api/v1/brands
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateBrand>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let brand = BrandRepo::create(&state.pool, &input).await?;
    tracing::info!(id = brand.id, name = %brand.name, "Brand created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: brand })))
}

/// GET /api/v1/brands/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let brand = BrandRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Brand",
            id,
        }))?;
    Ok(Json(DataResponse { data: brand }))
}

/// PUT /api/v1/brands/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBrand>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let brand = BrandRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Brand",
            id,
        }))?;
    tracing::info!(id, "Brand updated");
    Ok(Json(DataResponse { data: brand }))
}

/// DELETE /api/v1/brands/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if BrandRepo::delete(&state.pool, id).await? {
        tracing::info!(id, "Brand deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Brand",
            id,
        }))
    }
}
