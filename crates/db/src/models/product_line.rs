//! Product line (SKU) model and DTOs.
//!
//! Lines are ordered within their product. `order` is assigned on insert
//! when omitted and validated for uniqueness when supplied.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp};
use validator::Validate;

use super::product_image::ProductImage;

/// A row from the `product_lines` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductLine {
    pub id: DbId,
    pub price: Decimal,
    pub sku: String,
    pub stock_qty: i32,
    pub product_id: DbId,
    pub is_active: bool,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A product line with its images and `attribute_id -> value` specification.
#[derive(Debug, Clone, Serialize)]
pub struct ProductLineDetail {
    #[serde(flatten)]
    pub line: ProductLine,
    pub product_image: Vec<ProductImage>,
    pub specification: BTreeMap<DbId, String>,
}

/// DTO for creating a product line (product id comes from the path).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductLine {
    pub price: Decimal,
    #[validate(length(min = 1, max = 100))]
    pub sku: String,
    pub stock_qty: i32,
    pub is_active: Option<bool>,
    /// Explicit position; the next free position is used when omitted.
    pub order: Option<i32>,
}

/// DTO for updating a product line. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProductLine {
    pub price: Option<Decimal>,
    #[validate(length(min = 1, max = 100))]
    pub sku: Option<String>,
    pub stock_qty: Option<i32>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
}
