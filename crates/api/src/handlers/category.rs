//! Handlers for the `/categories` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use storefront_core::catalog::validate_slug;
use storefront_core::error::CoreError;
use storefront_core::types::DbId;
use storefront_db::models::category::{Category, CreateCategory, UpdateCategory};
use storefront_db::repositories::CategoryRepo;

use super::validate_input;
use crate::error::{AppError, AppResult};
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

async fn ensure_category_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Category> {
    CategoryRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        })
    })
}

/// GET /api/v1/categories?include_inactive=false
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool, params.include_inactive).await?;
    tracing::debug!(count = categories.len(), "Listed categories");
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/categories
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    validate_slug(&input.slug)?;

    let category = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(
        id = category.id,
        slug = %category.slug,
        parent_id = ?category.parent_id,
        "Category created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = ensure_category_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: category }))
}

/// GET /api/v1/categories/by-slug/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::Database(sqlx::Error::RowNotFound))?;
    Ok(Json(DataResponse { data: category }))
}

/// GET /api/v1/categories/{id}/children
pub async fn list_children(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_category_exists(&state.pool, id).await?;
    let children = CategoryRepo::list_children(&state.pool, id).await?;
    Ok(Json(DataResponse { data: children }))
}

/// PUT /api/v1/categories/{id}
///
/// A `parent_id` that is the category itself or one of its descendants is
/// rejected with 400 on `parent_id`.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    if let Some(ref slug) = input.slug {
        validate_slug(slug)?;
    }

    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    tracing::info!(id, parent_id = ?category.parent_id, "Category updated");
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/categories/{id}
///
/// Refused with 409 while the category still has children.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if CategoryRepo::delete(&state.pool, id).await? {
        tracing::info!(id, "Category deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))
    }
}
