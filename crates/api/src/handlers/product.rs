//! Handlers for the `/products` resource.
//!
//! Reads return the storefront detail view (lines, images and
//! specifications nested). Lines are created under their product and
//! product-level attribute values are managed here too.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use storefront_core::attribute::LinkCheck;
use storefront_core::catalog::validate_slug;
use storefront_core::error::CoreError;
use storefront_core::types::DbId;
use storefront_db::models::attribute::LinkAttributeValue;
use storefront_db::models::product::{CreateProduct, ProductListParams, UpdateProduct};
use storefront_db::models::product_line::CreateProductLine;
use storefront_db::repositories::{ProductLineRepo, ProductRepo};

use super::validate_input;
use crate::error::{AppError, AppResult};
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Product",
        id,
    })
}

async fn ensure_product_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<()> {
    ProductRepo::find_by_id(pool, id)
        .await?
        .map(|_| ())
        .ok_or_else(|| not_found(id))
}

/// GET /api/v1/products?include_inactive=false&category=<slug>
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> AppResult<impl IntoResponse> {
    let products = ProductRepo::list(&state.pool, &params).await?;
    tracing::debug!(
        count = products.len(),
        category = ?params.category,
        "Listed products"
    );
    Ok(Json(DataResponse { data: products }))
}

/// POST /api/v1/products
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProduct>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    validate_slug(&input.slug)?;

    let product = ProductRepo::create(&state.pool, &input).await?;
    tracing::info!(id = product.id, slug = %product.slug, "Product created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// GET /api/v1/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = ProductRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: detail }))
}

/// GET /api/v1/products/by-slug/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let detail = ProductRepo::find_detail_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::Database(sqlx::Error::RowNotFound))?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/products/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    if let Some(ref slug) = input.slug {
        validate_slug(slug)?;
    }

    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id, "Product updated");
    Ok(Json(DataResponse { data: product }))
}

/// DELETE /api/v1/products/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ProductRepo::delete(&state.pool, id).await? {
        tracing::info!(id, "Product deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

// ---------------------------------------------------------------------------
// Lines
// ---------------------------------------------------------------------------

/// GET /api/v1/products/{id}/lines?include_inactive=false
pub async fn list_lines(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    ensure_product_exists(&state.pool, id).await?;
    let lines = ProductLineRepo::list_by_product(&state.pool, id, params.include_inactive).await?;
    Ok(Json(DataResponse { data: lines }))
}

/// POST /api/v1/products/{id}/lines
///
/// `order` is optional; when omitted the line goes after the last one.
/// An explicit `order` already used in this product is rejected with 400.
pub async fn create_line(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateProductLine>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;

    let line = ProductLineRepo::create(&state.pool, id, &input).await?;
    tracing::info!(
        product_id = id,
        line_id = line.id,
        order = line.order,
        "Product line created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: line })))
}

// ---------------------------------------------------------------------------
// Attribute values
// ---------------------------------------------------------------------------

/// GET /api/v1/products/{id}/attribute-values
pub async fn list_attribute_values(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_product_exists(&state.pool, id).await?;
    let values = ProductRepo::list_attribute_values(&state.pool, id).await?;
    Ok(Json(DataResponse { data: values }))
}

/// POST /api/v1/products/{id}/attribute-values
///
/// Returns 201 with the product's linked values, or 200 if the value was
/// already linked.
pub async fn link_attribute_value(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<LinkAttributeValue>,
) -> AppResult<impl IntoResponse> {
    let check = ProductRepo::link_attribute_value(&state.pool, id, body.attribute_value_id).await?;
    let status = match check {
        LinkCheck::Insert => {
            tracing::info!(
                product_id = id,
                attribute_value_id = body.attribute_value_id,
                "Attribute value linked to product"
            );
            StatusCode::CREATED
        }
        LinkCheck::AlreadyLinked => StatusCode::OK,
    };
    let values = ProductRepo::list_attribute_values(&state.pool, id).await?;
    Ok((status, Json(DataResponse { data: values })))
}

/// DELETE /api/v1/products/{id}/attribute-values/{value_id}
pub async fn unlink_attribute_value(
    State(state): State<AppState>,
    Path((id, value_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if ProductRepo::unlink_attribute_value(&state.pool, id, value_id).await? {
        tracing::info!(product_id = id, attribute_value_id = value_id, "Attribute value unlinked");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "ProductAttributeValue",
            id: value_id,
        }))
    }
}
