use axum::routing::get;
use axum::Router;

use crate::handlers::product_type;
use crate::state::AppState;

/// Routes mounted at `/product-types`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(product_type::list).post(product_type::create))
        .route(
            "/{id}",
            get(product_type::get_by_id)
                .put(product_type::update)
                .delete(product_type::delete),
        )
}
