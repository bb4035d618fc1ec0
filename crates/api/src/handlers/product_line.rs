//! Handlers for `/product-lines/{id}`, its images and attribute values.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use storefront_core::attribute::LinkCheck;
use storefront_core::error::CoreError;
use storefront_core::types::DbId;
use storefront_db::models::attribute::LinkAttributeValue;
use storefront_db::models::product_image::CreateProductImage;
use storefront_db::models::product_line::UpdateProductLine;
use storefront_db::repositories::{ProductImageRepo, ProductLineRepo};

use super::validate_input;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ProductLine",
        id,
    })
}

async fn ensure_line_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<()> {
    ProductLineRepo::find_by_id(pool, id)
        .await?
        .map(|_| ())
        .ok_or_else(|| not_found(id))
}

/// GET /api/v1/product-lines/{id}
///
/// The line with its images and `attribute_id -> value` specification.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = ProductLineRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/product-lines/{id}
///
/// A new `order` must not be used by another line of the same product;
/// resubmitting the line's current order is accepted.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProductLine>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let line = ProductLineRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id, order = line.order, "Product line updated");
    Ok(Json(DataResponse { data: line }))
}

/// DELETE /api/v1/product-lines/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ProductLineRepo::delete(&state.pool, id).await? {
        tracing::info!(id, "Product line deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// GET /api/v1/product-lines/{id}/images
pub async fn list_images(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_line_exists(&state.pool, id).await?;
    let images = ProductImageRepo::list_by_product_line(&state.pool, id).await?;
    Ok(Json(DataResponse { data: images }))
}

/// POST /api/v1/product-lines/{id}/images
pub async fn create_image(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateProductImage>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let image = ProductImageRepo::create(&state.pool, id, &input).await?;
    tracing::info!(
        product_line_id = id,
        image_id = image.id,
        order = image.order,
        "Product image created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: image })))
}

// ---------------------------------------------------------------------------
// Attribute values
// ---------------------------------------------------------------------------

/// GET /api/v1/product-lines/{id}/attribute-values
pub async fn list_attribute_values(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_line_exists(&state.pool, id).await?;
    let values = ProductLineRepo::list_attribute_values(&state.pool, id).await?;
    Ok(Json(DataResponse { data: values }))
}

/// POST /api/v1/product-lines/{id}/attribute-values
///
/// A line holds at most one value per attribute: linking a second value of
/// an attribute the line already has is rejected with 400.
pub async fn link_attribute_value(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<LinkAttributeValue>,
) -> AppResult<impl IntoResponse> {
    let check =
        ProductLineRepo::link_attribute_value(&state.pool, id, body.attribute_value_id).await?;
    let status = match check {
        LinkCheck::Insert => {
            tracing::info!(
                product_line_id = id,
                attribute_value_id = body.attribute_value_id,
                "Attribute value linked to product line"
            );
            StatusCode::CREATED
        }
        LinkCheck::AlreadyLinked => StatusCode::OK,
    };
    let values = ProductLineRepo::list_attribute_values(&state.pool, id).await?;
    Ok((status, Json(DataResponse { data: values })))
}

/// DELETE /api/v1/product-lines/{id}/attribute-values/{value_id}
pub async fn unlink_attribute_value(
    State(state): State<AppState>,
    Path((id, value_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if ProductLineRepo::unlink_attribute_value(&state.pool, id, value_id).await? {
        tracing::info!(
            product_line_id = id,
            attribute_value_id = value_id,
            "Attribute value unlinked"
        );
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "ProductLineAttributeValue",
            id: value_id,
        }))
    }
}
