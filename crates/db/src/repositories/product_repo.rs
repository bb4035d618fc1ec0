//! Repository for the `products` table, its attribute links and the
//! storefront detail view.

use std::collections::BTreeMap;

use sqlx::PgPool;
use storefront_core::attribute::LinkCheck;
use storefront_core::types::DbId;

use super::attribute_link::PRODUCT_LINKS;
use super::ProductLineRepo;
use crate::error::DbError;
use crate::models::attribute::LinkedAttributeValue;
use crate::models::product::{
    CreateProduct, Product, ProductDetail, ProductHeader, ProductListParams, UpdateProduct,
};

const COLUMNS: &str = "id, name, slug, description, is_digital, brand_id, category_id, \
    product_type_id, is_active, created_at, updated_at";

/// Product columns joined with brand and category names.
const HEADER_SELECT: &str = "SELECT p.id, p.name, p.slug, p.description, p.is_digital, \
        p.is_active, p.product_type_id, b.name AS brand_name, c.name AS category_name \
     FROM products p \
     JOIN brands b ON b.id = p.brand_id \
     LEFT JOIN categories c ON c.id = p.category_id";

/// Provides CRUD, listing and detail operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product. `description` defaults to empty, flags to `false`.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products \
                (name, slug, description, is_digital, brand_id, category_id, \
                 product_type_id, is_active) \
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, false), $5, $6, $7, \
                 COALESCE($8, false)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.is_digital)
            .bind(input.brand_id)
            .bind(input.category_id)
            .bind(input.product_type_id)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a product by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List products ordered by name.
    ///
    /// Inactive products are skipped unless `include_inactive` is set; a
    /// `category` slug restricts the result to that category.
    pub async fn list(
        pool: &PgPool,
        params: &ProductListParams,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products \
             WHERE ($1 OR is_active = true) \
               AND ($2::TEXT IS NULL OR category_id = \
                    (SELECT id FROM categories WHERE slug = $2)) \
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(params.include_inactive)
            .bind(&params.category)
            .fetch_all(pool)
            .await
    }

    /// Update a product. Only non-`None` fields are applied, except that
    /// `category_id: Some(None)` clears the category.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET \
                name = COALESCE($2, name), \
                slug = COALESCE($3, slug), \
                description = COALESCE($4, description), \
                is_digital = COALESCE($5, is_digital), \
                brand_id = COALESCE($6, brand_id), \
                category_id = CASE WHEN $7 THEN $8 ELSE category_id END, \
                product_type_id = COALESCE($9, product_type_id), \
                is_active = COALESCE($10, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.is_digital)
            .bind(input.brand_id)
            .bind(input.category_id.is_some())
            .bind(input.category_id.flatten())
            .bind(input.product_type_id)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product together with its lines, images and links.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Detail view
    // -----------------------------------------------------------------------

    /// Storefront detail for a product by ID.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<ProductDetail>, sqlx::Error> {
        let query = format!("{HEADER_SELECT} WHERE p.id = $1");
        let header = sqlx::query_as::<_, ProductHeader>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        match header {
            Some(header) => Ok(Some(Self::assemble_detail(pool, header).await?)),
            None => Ok(None),
        }
    }

    /// Storefront detail for a product by slug.
    pub async fn find_detail_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<ProductDetail>, sqlx::Error> {
        let query = format!("{HEADER_SELECT} WHERE p.slug = $1");
        let header = sqlx::query_as::<_, ProductHeader>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await?;
        match header {
            Some(header) => Ok(Some(Self::assemble_detail(pool, header).await?)),
            None => Ok(None),
        }
    }

    async fn assemble_detail(
        pool: &PgPool,
        header: ProductHeader,
    ) -> Result<ProductDetail, sqlx::Error> {
        let lines = ProductLineRepo::list_by_product(pool, header.id, true).await?;
        let mut product_line = Vec::with_capacity(lines.len());
        for line in lines {
            product_line.push(ProductLineRepo::detail(pool, line).await?);
        }

        let type_specification = Self::type_specification(pool, header.product_type_id).await?;

        Ok(ProductDetail {
            header,
            product_line,
            type_specification,
        })
    }

    /// `attribute_id -> attribute name` for the attributes of a product type.
    async fn type_specification(
        pool: &PgPool,
        product_type_id: DbId,
    ) -> Result<BTreeMap<DbId, String>, sqlx::Error> {
        let rows: Vec<(DbId, String)> = sqlx::query_as(
            "SELECT a.id, a.name \
             FROM attributes a \
             JOIN product_type_attributes pta ON pta.attribute_id = a.id \
             WHERE pta.product_type_id = $1",
        )
        .bind(product_type_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().collect())
    }

    // -----------------------------------------------------------------------
    // Attribute links
    // -----------------------------------------------------------------------

    /// Link an attribute value to a product, one value per attribute.
    pub async fn link_attribute_value(
        pool: &PgPool,
        product_id: DbId,
        attribute_value_id: DbId,
    ) -> Result<LinkCheck, DbError> {
        PRODUCT_LINKS.link(pool, product_id, attribute_value_id).await
    }

    /// Remove an attribute value from a product.
    pub async fn unlink_attribute_value(
        pool: &PgPool,
        product_id: DbId,
        attribute_value_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        PRODUCT_LINKS
            .unlink(pool, product_id, attribute_value_id)
            .await
    }

    /// List the attribute values linked to a product.
    pub async fn list_attribute_values(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<LinkedAttributeValue>, sqlx::Error> {
        PRODUCT_LINKS.list(pool, product_id).await
    }
}
