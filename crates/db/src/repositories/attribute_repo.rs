//! Repository for the `attributes` and `attribute_values` tables.

use sqlx::PgPool;
use storefront_core::types::DbId;

use crate::models::attribute::{
    Attribute, AttributeValue, CreateAttribute, CreateAttributeValue, UpdateAttribute,
};

const COLUMNS: &str = "id, name, description, created_at, updated_at";

const VALUE_COLUMNS: &str = "id, attribute_id, attribute_value, created_at, updated_at";

/// Provides CRUD operations for attributes and their values.
pub struct AttributeRepo;

impl AttributeRepo {
    /// Insert a new attribute.
    pub async fn create(pool: &PgPool, input: &CreateAttribute) -> Result<Attribute, sqlx::Error> {
        let query = format!(
            "INSERT INTO attributes (name, description) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attribute>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find an attribute by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Attribute>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attributes WHERE id = $1");
        sqlx::query_as::<_, Attribute>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all attributes ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Attribute>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attributes ORDER BY name, id");
        sqlx::query_as::<_, Attribute>(&query).fetch_all(pool).await
    }

    /// Update an attribute. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAttribute,
    ) -> Result<Option<Attribute>, sqlx::Error> {
        let query = format!(
            "UPDATE attributes SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attribute>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete an attribute together with its values and their links.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM attributes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Attribute values
    // -----------------------------------------------------------------------

    /// Insert a value for an attribute.
    pub async fn create_value(
        pool: &PgPool,
        attribute_id: DbId,
        input: &CreateAttributeValue,
    ) -> Result<AttributeValue, sqlx::Error> {
        let query = format!(
            "INSERT INTO attribute_values (attribute_id, attribute_value) \
             VALUES ($1, $2) \
             RETURNING {VALUE_COLUMNS}"
        );
        sqlx::query_as::<_, AttributeValue>(&query)
            .bind(attribute_id)
            .bind(&input.attribute_value)
            .fetch_one(pool)
            .await
    }

    /// Find an attribute value by its internal ID.
    pub async fn find_value(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AttributeValue>, sqlx::Error> {
        let query = format!("SELECT {VALUE_COLUMNS} FROM attribute_values WHERE id = $1");
        sqlx::query_as::<_, AttributeValue>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the values of an attribute.
    pub async fn list_values(
        pool: &PgPool,
        attribute_id: DbId,
    ) -> Result<Vec<AttributeValue>, sqlx::Error> {
        let query = format!(
            "SELECT {VALUE_COLUMNS} FROM attribute_values \
             WHERE attribute_id = $1 \
             ORDER BY attribute_value, id"
        );
        sqlx::query_as::<_, AttributeValue>(&query)
            .bind(attribute_id)
            .fetch_all(pool)
            .await
    }

    /// Delete an attribute value and every link to it.
    pub async fn delete_value(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM attribute_values WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
