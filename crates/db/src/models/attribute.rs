//! Attribute and attribute-value models and DTOs.
//!
//! An attribute is a specification axis ("color"); an attribute value is
//! one setting of it ("red"). Values are linked to products and product
//! lines through link tables, at most one value per attribute per owner.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `attributes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attribute {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new attribute.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAttribute {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating an existing attribute.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAttribute {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub description: Option<String>,
}

/// A row from the `attribute_values` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttributeValue {
    pub id: DbId,
    pub attribute_id: DbId,
    pub attribute_value: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a value under an attribute (attribute id comes from the path).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAttributeValue {
    #[validate(length(min = 1, max = 100))]
    pub attribute_value: String,
}

/// An attribute value linked to a product or product line, joined with
/// its attribute.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LinkedAttributeValue {
    pub attribute_value_id: DbId,
    pub attribute_value: String,
    pub attribute_id: DbId,
    pub attribute_name: String,
}

/// Request body for linking an attribute value to an owner.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkAttributeValue {
    pub attribute_value_id: DbId,
}
