//! Product type model and DTOs.
//!
//! A product type names the attributes its products are specified by,
//! through the `product_type_attributes` link table.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp};
use validator::Validate;

use super::attribute::Attribute;

/// A row from the `product_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductType {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A product type enriched with its attributes.
#[derive(Debug, Clone, Serialize)]
pub struct ProductTypeWithAttributes {
    #[serde(flatten)]
    pub product_type: ProductType,
    pub attributes: Vec<Attribute>,
}

/// DTO for creating a new product type.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductType {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Attribute IDs to associate with this type.
    #[serde(default)]
    pub attribute_ids: Vec<DbId>,
}

/// DTO for updating an existing product type.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProductType {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// If `Some`, replaces all attribute associations. If `None`, leaves unchanged.
    pub attribute_ids: Option<Vec<DbId>>,
}
