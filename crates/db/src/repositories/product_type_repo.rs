//! Repository for the `product_types` and `product_type_attributes` tables.

use sqlx::PgPool;
use storefront_core::types::DbId;

use crate::models::attribute::Attribute;
use crate::models::product_type::{
    CreateProductType, ProductType, ProductTypeWithAttributes, UpdateProductType,
};

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Column list for the `attributes` table (used in JOIN queries).
const ATTRIBUTE_COLUMNS: &str = "a.id, a.name, a.description, a.created_at, a.updated_at";

/// Provides CRUD operations for product types and their attribute associations.
pub struct ProductTypeRepo;

impl ProductTypeRepo {
    /// Insert a new product type.
    ///
    /// If `attribute_ids` is non-empty, also creates link rows in a transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProductType,
    ) -> Result<ProductType, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("INSERT INTO product_types (name) VALUES ($1) RETURNING {COLUMNS}");
        let product_type = sqlx::query_as::<_, ProductType>(&query)
            .bind(&input.name)
            .fetch_one(&mut *tx)
            .await?;

        if !input.attribute_ids.is_empty() {
            Self::set_attributes_inner(&mut tx, product_type.id, &input.attribute_ids).await?;
        }

        tx.commit().await?;
        Ok(product_type)
    }

    /// Find a product type by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProductType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM product_types WHERE id = $1");
        sqlx::query_as::<_, ProductType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a product type by ID, enriched with its attributes.
    pub async fn find_by_id_with_attributes(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProductTypeWithAttributes>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(product_type) => {
                let attributes = Self::get_attributes(pool, product_type.id).await?;
                Ok(Some(ProductTypeWithAttributes {
                    product_type,
                    attributes,
                }))
            }
            None => Ok(None),
        }
    }

    /// List all product types with their attributes.
    pub async fn list_with_attributes(
        pool: &PgPool,
    ) -> Result<Vec<ProductTypeWithAttributes>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM product_types ORDER BY name, id");
        let types = sqlx::query_as::<_, ProductType>(&query)
            .fetch_all(pool)
            .await?;

        let mut result = Vec::with_capacity(types.len());
        for product_type in types {
            let attributes = Self::get_attributes(pool, product_type.id).await?;
            result.push(ProductTypeWithAttributes {
                product_type,
                attributes,
            });
        }
        Ok(result)
    }

    /// Update a product type. If `attribute_ids` is `Some`, replaces the
    /// attribute associations. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProductType,
    ) -> Result<Option<ProductType>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE product_types SET name = COALESCE($2, name) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let product_type = sqlx::query_as::<_, ProductType>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(&mut *tx)
            .await?;

        if let (Some(_), Some(attribute_ids)) = (&product_type, &input.attribute_ids) {
            Self::set_attributes_inner(&mut tx, id, attribute_ids).await?;
        }

        tx.commit().await?;
        Ok(product_type)
    }

    /// Delete a product type. Fails with a foreign-key violation while
    /// products still use it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM product_types WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Get all attributes associated with a product type, ordered by name.
    pub async fn get_attributes(
        pool: &PgPool,
        product_type_id: DbId,
    ) -> Result<Vec<Attribute>, sqlx::Error> {
        let query = format!(
            "SELECT {ATTRIBUTE_COLUMNS} \
             FROM attributes a \
             JOIN product_type_attributes pta ON pta.attribute_id = a.id \
             WHERE pta.product_type_id = $1 \
             ORDER BY a.name, a.id"
        );
        sqlx::query_as::<_, Attribute>(&query)
            .bind(product_type_id)
            .fetch_all(pool)
            .await
    }

    /// Replace attribute associations within an existing transaction.
    async fn set_attributes_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        product_type_id: DbId,
        attribute_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM product_type_attributes WHERE product_type_id = $1")
            .bind(product_type_id)
            .execute(&mut **tx)
            .await?;

        for &attribute_id in attribute_ids {
            sqlx::query(
                "INSERT INTO product_type_attributes (product_type_id, attribute_id) \
                 VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(product_type_id)
            .bind(attribute_id)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}
