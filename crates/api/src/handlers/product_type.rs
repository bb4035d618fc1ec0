//! Handlers for the `/product-types` resource.
//!
//! Product types are returned with their attributes; `attribute_ids` on
//! create/update sets the attribute list.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use storefront_core::error::CoreError;
use storefront_core::types::DbId;
use storefront_db::models::product_type::{
    CreateProductType, ProductTypeWithAttributes, UpdateProductType,
};
use storefront_db::repositories::ProductTypeRepo;

use super::validate_input;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

async fn find_with_attributes(
    pool: &sqlx::PgPool,
    id: DbId,
) -> AppResult<ProductTypeWithAttributes> {
    ProductTypeRepo::find_by_id_with_attributes(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProductType",
            id,
        }))
}

/// GET /api/v1/product-types
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let types = ProductTypeRepo::list_with_attributes(&state.pool).await?;
    tracing::debug!(count = types.len(), "Listed product types");
    Ok(Json(DataResponse { data: types }))
}

/// POST /api/v1/product-types
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProductType>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let created = ProductTypeRepo::create(&state.pool, &input).await?;
    let with_attributes = find_with_attributes(&state.pool, created.id).await?;
    tracing::info!(
        id = created.id,
        attribute_count = with_attributes.attributes.len(),
        "Product type created"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: with_attributes,
        }),
    ))
}

/// GET /api/v1/product-types/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let product_type = find_with_attributes(&state.pool, id).await?;
    Ok(Json(DataResponse { data: product_type }))
}

/// PUT /api/v1/product-types/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProductType>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    ProductTypeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProductType",
            id,
        }))?;
    let with_attributes = find_with_attributes(&state.pool, id).await?;
    tracing::info!(id, "Product type updated");
    Ok(Json(DataResponse {
        data: with_attributes,
    }))
}

/// DELETE /api/v1/product-types/{id}
///
/// Refused with 409 while products still use the type.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ProductTypeRepo::delete(&state.pool, id).await? {
        tracing::info!(id, "Product type deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "ProductType",
            id,
        }))
    }
}
