//! Product entity model, DTOs and the storefront detail representation.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp};
use validator::Validate;

use super::product_line::ProductLineDetail;

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub is_digital: bool,
    pub brand_id: DbId,
    pub category_id: Option<DbId>,
    pub product_type_id: DbId,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Product columns flattened with brand and category names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductHeader {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub is_digital: bool,
    pub is_active: bool,
    pub product_type_id: DbId,
    pub brand_name: String,
    pub category_name: Option<String>,
}

/// Full storefront view of a product: lines with images and specification,
/// plus the attribute names of its product type.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub header: ProductHeader,
    pub product_line: Vec<ProductLineDetail>,
    pub type_specification: BTreeMap<DbId, String>,
}

/// DTO for creating a new product.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_digital: Option<bool>,
    pub brand_id: DbId,
    pub category_id: Option<DbId>,
    pub product_type_id: DbId,
    pub is_active: Option<bool>,
}

/// DTO for updating an existing product. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub is_digital: Option<bool>,
    pub brand_id: Option<DbId>,
    /// Absent keeps the category, `null` clears it.
    #[serde(default, deserialize_with = "present")]
    pub category_id: Option<Option<DbId>>,
    pub product_type_id: Option<DbId>,
    pub is_active: Option<bool>,
}

/// Wrap a present JSON value, `null` included, in `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Filters for listing products.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductListParams {
    #[serde(default)]
    pub include_inactive: bool,
    /// Restrict to products in the category with this slug.
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_id_distinguishes_absent_from_null() {
        let absent: UpdateProduct = serde_json::from_str(r#"{"name": "Desk"}"#).unwrap();
        assert_eq!(absent.category_id, None);

        let cleared: UpdateProduct = serde_json::from_str(r#"{"category_id": null}"#).unwrap();
        assert_eq!(cleared.category_id, Some(None));

        let moved: UpdateProduct = serde_json::from_str(r#"{"category_id": 4}"#).unwrap();
        assert_eq!(moved.category_id, Some(Some(4)));
    }
}
