pub mod attribute;
pub mod brand;
pub mod category;
pub mod health;
pub mod product;
pub mod product_image;
pub mod product_line;
pub mod product_type;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories                                  list, create
/// /categories/by-slug/{slug}                   get by slug
/// /categories/{id}                             get, update, delete
/// /categories/{id}/children                    direct children
///
/// /brands                                      list, create
/// /brands/{id}                                 get, update, delete
///
/// /attributes                                  list, create
/// /attributes/{id}                             get, update, delete
/// /attributes/{id}/values                      list, create values
/// /attribute-values/{id}                       get, delete
///
/// /product-types                               list, create
/// /product-types/{id}                          get, update, delete
///
/// /products                                    list (?category=), create
/// /products/by-slug/{slug}                     detail by slug
/// /products/{id}                               detail, update, delete
/// /products/{id}/lines                         list, create (ordered)
/// /products/{id}/attribute-values              list, link
/// /products/{id}/attribute-values/{value_id}   unlink
///
/// /product-lines/{id}                          detail, update, delete
/// /product-lines/{id}/images                   list, create (ordered)
/// /product-lines/{id}/attribute-values         list, link
/// /product-lines/{id}/attribute-values/{value_id}  unlink
///
/// /product-images/{id}                         get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/categories", category::router())
        .nest("/brands", brand::router())
        .nest("/attributes", attribute::router())
        .nest("/attribute-values", attribute::value_router())
        .nest("/product-types", product_type::router())
        .nest("/products", product::router())
        .nest("/product-lines", product_line::router())
        .nest("/product-images", product_image::router())
}
