//! Repository for the `brands` table.

use sqlx::PgPool;
use storefront_core::types::DbId;

use crate::models::brand::{Brand, CreateBrand, UpdateBrand};

const COLUMNS: &str = "id, name, is_active, created_at, updated_at";

/// Provides CRUD operations for brands.
pub struct BrandRepo;

impl BrandRepo {
    /// Insert a new brand. `is_active` defaults to `false`.
    pub async fn create(pool: &PgPool, input: &CreateBrand) -> Result<Brand, sqlx::Error> {
        let query = format!(
            "INSERT INTO brands (name, is_active) \
             VALUES ($1, COALESCE($2, false)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Brand>(&query)
            .bind(&input.name)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a brand by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Brand>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM brands WHERE id = $1");
        sqlx::query_as::<_, Brand>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List brands ordered by name, optionally including inactive ones.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Brand>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM brands WHERE ($1 OR is_active = true) ORDER BY name"
        );
        sqlx::query_as::<_, Brand>(&query)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    /// Update a brand. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBrand,
    ) -> Result<Option<Brand>, sqlx::Error> {
        let query = format!(
            "UPDATE brands SET \
                name = COALESCE($2, name), \
                is_active = COALESCE($3, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Brand>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a brand and, by cascade, its products.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM brands WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
