//! Brand entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `brands` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Brand {
    pub id: DbId,
    pub name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new brand.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBrand {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub is_active: Option<bool>,
}

/// DTO for updating an existing brand.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBrand {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub is_active: Option<bool>,
}
