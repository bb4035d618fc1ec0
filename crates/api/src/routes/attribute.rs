use axum::routing::get;
use axum::Router;

use crate::handlers::attribute;
use crate::state::AppState;

/// Routes mounted at `/attributes`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// GET    /{id}/values   -> list_values
/// POST   /{id}/values   -> create_value
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(attribute::list).post(attribute::create))
        .route(
            "/{id}",
            get(attribute::get_by_id)
                .put(attribute::update)
                .delete(attribute::delete),
        )
        .route(
            "/{id}/values",
            get(attribute::list_values).post(attribute::create_value),
        )
}

/// Routes mounted at `/attribute-values`.
pub fn value_router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(attribute::get_value).delete(attribute::delete_value),
    )
}
