use axum::routing::get;
use axum::Router;

use crate::handlers::product_image;
use crate::state::AppState;

/// Routes mounted at `/product-images`.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(product_image::get_by_id)
            .put(product_image::update)
            .delete(product_image::delete),
    )
}
