//! Category entity model and DTOs.
//!
//! Categories form a tree through `parent_id`. Deleting a category that
//! still has children is rejected by the database.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<DbId>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new category.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub slug: String,
    pub parent_id: Option<DbId>,
    pub is_active: Option<bool>,
}

/// DTO for updating an existing category.
///
/// `parent_id` can be moved to another parent but not cleared.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub slug: Option<String>,
    pub parent_id: Option<DbId>,
    pub is_active: Option<bool>,
}
