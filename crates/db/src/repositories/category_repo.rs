//! Repository for the `categories` table.

use sqlx::{PgConnection, PgPool};
use storefront_core::catalog::validate_category_parent;
use storefront_core::types::DbId;

use crate::error::DbError;
use crate::models::category::{Category, CreateCategory, UpdateCategory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, parent_id, is_active, created_at, updated_at";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category. `is_active` defaults to `false`.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, slug, parent_id, is_active) \
             VALUES ($1, $2, $3, COALESCE($4, false)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.parent_id)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a category by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a category by its slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE slug = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List categories ordered by name, optionally including inactive ones.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories \
             WHERE ($1 OR is_active = true) \
             ORDER BY name"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    /// List the direct children of a category, ordered by name.
    pub async fn list_children(
        pool: &PgPool,
        parent_id: DbId,
    ) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories WHERE parent_id = $1 ORDER BY name"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(parent_id)
            .fetch_all(pool)
            .await
    }

    /// Ids on the path from `id` up to its root, `id` first.
    ///
    /// Empty when `id` does not exist.
    pub async fn ancestor_ids(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "WITH RECURSIVE ancestors (id, parent_id, depth) AS ( \
                SELECT id, parent_id, 0 FROM categories WHERE id = $1 \
                UNION \
                SELECT c.id, c.parent_id, a.depth + 1 \
                FROM categories c JOIN ancestors a ON c.id = a.parent_id \
                WHERE a.depth < 1000 \
             ) \
             SELECT id FROM ancestors ORDER BY depth",
        )
        .bind(id)
        .fetch_all(conn)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Update a category. Only non-`None` fields are applied.
    ///
    /// A new `parent_id` is rejected with `InvalidField` when it is the
    /// category itself or one of its descendants. Re-parenting takes a
    /// table lock so two concurrent moves cannot close a loop.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, DbError> {
        let mut tx = pool.begin().await?;

        if let Some(parent_id) = input.parent_id {
            sqlx::query("LOCK TABLE categories IN SHARE ROW EXCLUSIVE MODE")
                .execute(&mut *tx)
                .await?;
            let ancestors = Self::ancestor_ids(&mut *tx, parent_id).await?;
            validate_category_parent(id, parent_id, &ancestors)?;
        }

        let query = format!(
            "UPDATE categories SET \
                name = COALESCE($2, name), \
                slug = COALESCE($3, slug), \
                parent_id = COALESCE($4, parent_id), \
                is_active = COALESCE($5, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let category = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.parent_id)
            .bind(input.is_active)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(category)
    }

    /// Delete a category by ID. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign-key violation while child categories exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
