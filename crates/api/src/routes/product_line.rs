use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::product_line;
use crate::state::AppState;

/// Routes mounted at `/product-lines`.
///
/// ```text
/// GET    /{id}                               -> get_by_id
/// PUT    /{id}                               -> update
/// DELETE /{id}                               -> delete
/// GET    /{id}/images                        -> list_images
/// POST   /{id}/images                        -> create_image
/// GET    /{id}/attribute-values              -> list_attribute_values
/// POST   /{id}/attribute-values              -> link_attribute_value
/// DELETE /{id}/attribute-values/{value_id}   -> unlink_attribute_value
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(product_line::get_by_id)
                .put(product_line::update)
                .delete(product_line::delete),
        )
        .route(
            "/{id}/images",
            get(product_line::list_images).post(product_line::create_image),
        )
        .route(
            "/{id}/attribute-values",
            get(product_line::list_attribute_values).post(product_line::link_attribute_value),
        )
        .route(
            "/{id}/attribute-values/{value_id}",
            delete(product_line::unlink_attribute_value),
        )
}
