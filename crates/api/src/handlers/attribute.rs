//! Handlers for `/attributes` and their values.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use storefront_core::error::CoreError;
use storefront_core::types::DbId;
use storefront_db::models::attribute::{
    Attribute, CreateAttribute, CreateAttributeValue, UpdateAttribute,
};
use storefront_db::repositories::AttributeRepo;

use super::validate_input;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

async fn ensure_attribute_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Attribute> {
    AttributeRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Attribute",
            id,
        })
    })
}

/// GET /api/v1/attributes
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let attributes = AttributeRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: attributes }))
}

/// POST /api/v1/attributes
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateAttribute>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let attribute = AttributeRepo::create(&state.pool, &input).await?;
    tracing::info!(id = attribute.id, name = %attribute.name, "Attribute created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: attribute })))
}

/// GET /api/v1/attributes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let attribute = ensure_attribute_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: attribute }))
}

/// PUT /api/v1/attributes/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAttribute>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let attribute = AttributeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Attribute",
            id,
        }))?;
    tracing::info!(id, "Attribute updated");
    Ok(Json(DataResponse { data: attribute }))
}

/// DELETE /api/v1/attributes/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if AttributeRepo::delete(&state.pool, id).await? {
        tracing::info!(id, "Attribute deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Attribute",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// GET /api/v1/attributes/{id}/values
pub async fn list_values(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_attribute_exists(&state.pool, id).await?;
    let values = AttributeRepo::list_values(&state.pool, id).await?;
    Ok(Json(DataResponse { data: values }))
}

/// POST /api/v1/attributes/{id}/values
pub async fn create_value(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateAttributeValue>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    ensure_attribute_exists(&state.pool, id).await?;

    let value = AttributeRepo::create_value(&state.pool, id, &input).await?;
    tracing::info!(
        attribute_id = id,
        value_id = value.id,
        value = %value.attribute_value,
        "Attribute value created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: value })))
}

/// GET /api/v1/attribute-values/{id}
pub async fn get_value(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let value = AttributeRepo::find_value(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AttributeValue",
            id,
        }))?;
    Ok(Json(DataResponse { data: value }))
}

/// DELETE /api/v1/attribute-values/{id}
///
/// Also removes the value from every product and product line.
pub async fn delete_value(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if AttributeRepo::delete_value(&state.pool, id).await? {
        tracing::info!(id, "Attribute value deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "AttributeValue",
            id,
        }))
    }
}
