//! Repository for the `product_lines` table and its attribute links.
//!
//! Every insert and update runs the ordering pre-save hook for the owning
//! product inside the writing transaction.

use sqlx::PgPool;
use storefront_core::attribute::LinkCheck;
use storefront_core::catalog::validate_price;
use storefront_core::error::CoreError;
use storefront_core::ordering::ProductLineOrdering;
use storefront_core::types::DbId;

use super::attribute_link::PRODUCT_LINE_LINKS;
use super::ProductImageRepo;
use crate::error::DbError;
use crate::models::attribute::LinkedAttributeValue;
use crate::models::product_line::{
    CreateProductLine, ProductLine, ProductLineDetail, UpdateProductLine,
};
use crate::ordering::resolve_order;

const COLUMNS: &str = "id, price, sku, stock_qty, product_id, is_active, sort_order, \
    created_at, updated_at";

/// Provides CRUD, ordering and attribute-link operations for product lines.
pub struct ProductLineRepo;

impl ProductLineRepo {
    /// Insert a new line under `product_id`.
    ///
    /// `order` is assigned as the next position in the product when omitted,
    /// and rejected with [`CoreError::DuplicateOrder`] when it collides with
    /// another line of the same product.
    pub async fn create(
        pool: &PgPool,
        product_id: DbId,
        input: &CreateProductLine,
    ) -> Result<ProductLine, DbError> {
        validate_price(input.price)?;

        let mut tx = pool.begin().await?;

        let product: Option<(DbId,)> = sqlx::query_as("SELECT id FROM products WHERE id = $1")
            .bind(product_id)
            .fetch_optional(&mut *tx)
            .await?;
        if product.is_none() {
            return Err(CoreError::NotFound {
                entity: "Product",
                id: product_id,
            }
            .into());
        }

        let order =
            resolve_order::<ProductLineOrdering>(&mut *tx, Some(product_id), None, input.order)
                .await?;

        let query = format!(
            "INSERT INTO product_lines \
                (price, sku, stock_qty, product_id, is_active, sort_order) \
             VALUES ($1, $2, $3, $4, COALESCE($5, false), $6) \
             RETURNING {COLUMNS}"
        );
        let line = sqlx::query_as::<_, ProductLine>(&query)
            .bind(input.price)
            .bind(&input.sku)
            .bind(input.stock_qty)
            .bind(product_id)
            .bind(input.is_active)
            .bind(order)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(line)
    }

    /// Find a product line by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProductLine>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM product_lines WHERE id = $1");
        sqlx::query_as::<_, ProductLine>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the lines of a product in display order.
    pub async fn list_by_product(
        pool: &PgPool,
        product_id: DbId,
        include_inactive: bool,
    ) -> Result<Vec<ProductLine>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM product_lines \
             WHERE product_id = $1 AND ($2 OR is_active = true) \
             ORDER BY sort_order"
        );
        sqlx::query_as::<_, ProductLine>(&query)
            .bind(product_id)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    /// Update a product line. Only non-`None` fields are applied.
    ///
    /// A new `order` is validated against the other lines of the same
    /// product; the line's own current value never counts as a collision.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProductLine,
    ) -> Result<Option<ProductLine>, DbError> {
        if let Some(price) = input.price {
            validate_price(price)?;
        }

        let mut tx = pool.begin().await?;

        let current: Option<(DbId,)> =
            sqlx::query_as("SELECT product_id FROM product_lines WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((product_id,)) = current else {
            return Ok(None);
        };

        let order = match input.order {
            Some(requested) => Some(
                resolve_order::<ProductLineOrdering>(
                    &mut *tx,
                    Some(product_id),
                    Some(id),
                    Some(requested),
                )
                .await?,
            ),
            None => None,
        };

        let query = format!(
            "UPDATE product_lines SET \
                price = COALESCE($2, price), \
                sku = COALESCE($3, sku), \
                stock_qty = COALESCE($4, stock_qty), \
                is_active = COALESCE($5, is_active), \
                sort_order = COALESCE($6, sort_order) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let line = sqlx::query_as::<_, ProductLine>(&query)
            .bind(id)
            .bind(input.price)
            .bind(&input.sku)
            .bind(input.stock_qty)
            .bind(input.is_active)
            .bind(order)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(line)
    }

    /// Delete a product line with its images and links. Order values of the
    /// remaining lines are left as they are.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM product_lines WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Enrich a line with its images and attribute specification.
    pub async fn detail(pool: &PgPool, line: ProductLine) -> Result<ProductLineDetail, sqlx::Error> {
        let product_image = ProductImageRepo::list_by_product_line(pool, line.id).await?;
        let specification = PRODUCT_LINE_LINKS.specification(pool, line.id).await?;
        Ok(ProductLineDetail {
            line,
            product_image,
            specification,
        })
    }

    /// Find a product line by ID with images and specification.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProductLineDetail>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(line) => Ok(Some(Self::detail(pool, line).await?)),
            None => Ok(None),
        }
    }

    // -----------------------------------------------------------------------
    // Attribute links
    // -----------------------------------------------------------------------

    /// Link an attribute value to a product line.
    ///
    /// Fails with [`CoreError::DuplicateAttribute`] if the line already has
    /// a different value of the same attribute.
    pub async fn link_attribute_value(
        pool: &PgPool,
        product_line_id: DbId,
        attribute_value_id: DbId,
    ) -> Result<LinkCheck, DbError> {
        PRODUCT_LINE_LINKS
            .link(pool, product_line_id, attribute_value_id)
            .await
    }

    /// Remove an attribute value from a product line.
    pub async fn unlink_attribute_value(
        pool: &PgPool,
        product_line_id: DbId,
        attribute_value_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        PRODUCT_LINE_LINKS
            .unlink(pool, product_line_id, attribute_value_id)
            .await
    }

    /// List the attribute values linked to a product line.
    pub async fn list_attribute_values(
        pool: &PgPool,
        product_line_id: DbId,
    ) -> Result<Vec<LinkedAttributeValue>, sqlx::Error> {
        PRODUCT_LINE_LINKS.list(pool, product_line_id).await
    }
}
