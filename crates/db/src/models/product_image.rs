//! Product image model and DTOs.
//!
//! Images are ordered within their product line. Only the URL is stored;
//! file storage is handled elsewhere.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `product_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductImage {
    pub id: DbId,
    pub alternative_text: String,
    pub url: String,
    pub product_line_id: DbId,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an image (product line id comes from the path).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductImage {
    #[validate(length(min = 1, max = 100))]
    pub alternative_text: String,
    #[validate(length(min = 1))]
    pub url: Option<String>,
    pub order: Option<i32>,
}

/// DTO for updating an image. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProductImage {
    #[validate(length(min = 1, max = 100))]
    pub alternative_text: Option<String>,
    #[validate(length(min = 1))]
    pub url: Option<String>,
    pub order: Option<i32>,
}
