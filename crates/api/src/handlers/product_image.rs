//! Handlers for `/product-images/{id}`. Images are created under their
//! product line (see `product_line::create_image`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use storefront_core::error::CoreError;
use storefront_core::types::DbId;
use storefront_db::models::product_image::UpdateProductImage;
use storefront_db::repositories::ProductImageRepo;

use super::validate_input;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ProductImage",
        id,
    })
}

/// GET /api/v1/product-images/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let image = ProductImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: image }))
}

/// PUT /api/v1/product-images/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProductImage>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let image = ProductImageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id, order = image.order, "Product image updated");
    Ok(Json(DataResponse { data: image }))
}

/// DELETE /api/v1/product-images/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ProductImageRepo::delete(&state.pool, id).await? {
        tracing::info!(id, "Product image deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
