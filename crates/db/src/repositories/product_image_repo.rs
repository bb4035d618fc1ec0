//! Repository for the `product_images` table.
//!
//! Images are ordered within their product line through the same pre-save
//! hook as product lines.

use sqlx::PgPool;
use storefront_core::error::CoreError;
use storefront_core::ordering::ProductImageOrdering;
use storefront_core::types::DbId;

use crate::error::DbError;
use crate::models::product_image::{CreateProductImage, ProductImage, UpdateProductImage};
use crate::ordering::resolve_order;

const COLUMNS: &str = "id, alternative_text, url, product_line_id, sort_order, \
    created_at, updated_at";

/// Provides CRUD and ordering operations for product images.
pub struct ProductImageRepo;

impl ProductImageRepo {
    /// Insert a new image under `product_line_id`. `url` defaults to
    /// `test.jpg`; `order` follows the same rules as product lines.
    pub async fn create(
        pool: &PgPool,
        product_line_id: DbId,
        input: &CreateProductImage,
    ) -> Result<ProductImage, DbError> {
        let mut tx = pool.begin().await?;

        let line: Option<(DbId,)> = sqlx::query_as("SELECT id FROM product_lines WHERE id = $1")
            .bind(product_line_id)
            .fetch_optional(&mut *tx)
            .await?;
        if line.is_none() {
            return Err(CoreError::NotFound {
                entity: "ProductLine",
                id: product_line_id,
            }
            .into());
        }

        let order = resolve_order::<ProductImageOrdering>(
            &mut *tx,
            Some(product_line_id),
            None,
            input.order,
        )
        .await?;

        let query = format!(
            "INSERT INTO product_images (alternative_text, url, product_line_id, sort_order) \
             VALUES ($1, COALESCE($2, 'test.jpg'), $3, $4) \
             RETURNING {COLUMNS}"
        );
        let image = sqlx::query_as::<_, ProductImage>(&query)
            .bind(&input.alternative_text)
            .bind(&input.url)
            .bind(product_line_id)
            .bind(order)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(image)
    }

    /// Find an image by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProductImage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM product_images WHERE id = $1");
        sqlx::query_as::<_, ProductImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the images of a product line in display order.
    pub async fn list_by_product_line(
        pool: &PgPool,
        product_line_id: DbId,
    ) -> Result<Vec<ProductImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM product_images \
             WHERE product_line_id = $1 \
             ORDER BY sort_order"
        );
        sqlx::query_as::<_, ProductImage>(&query)
            .bind(product_line_id)
            .fetch_all(pool)
            .await
    }

    /// Update an image. A new `order` is validated within its product line.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProductImage,
    ) -> Result<Option<ProductImage>, DbError> {
        let mut tx = pool.begin().await?;

        let current: Option<(DbId,)> =
            sqlx::query_as("SELECT product_line_id FROM product_images WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((product_line_id,)) = current else {
            return Ok(None);
        };

        let order = match input.order {
            Some(requested) => Some(
                resolve_order::<ProductImageOrdering>(
                    &mut *tx,
                    Some(product_line_id),
                    Some(id),
                    Some(requested),
                )
                .await?,
            ),
            None => None,
        };

        let query = format!(
            "UPDATE product_images SET \
                alternative_text = COALESCE($2, alternative_text), \
                url = COALESCE($3, url), \
                sort_order = COALESCE($4, sort_order) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let image = sqlx::query_as::<_, ProductImage>(&query)
            .bind(id)
            .bind(&input.alternative_text)
            .bind(&input.url)
            .bind(order)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(image)
    }

    /// Delete an image by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM product_images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
