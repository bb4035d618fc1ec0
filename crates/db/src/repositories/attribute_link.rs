//! Link tables between attribute values and their owners (products and
//! product lines).
//!
//! Both tables follow the same rule: an owner carries at most one value per
//! attribute. The rule spans the link table and `attribute_values`, so no
//! index can express it; writers serialize on the owner row instead.

use std::collections::BTreeMap;

use sqlx::{PgConnection, PgPool};
use storefront_core::attribute::{
    check_attribute_link, specification_map, AttributeLink, LinkCheck, SpecificationEntry,
};
use storefront_core::error::CoreError;
use storefront_core::types::DbId;

use crate::error::DbError;
use crate::models::attribute::LinkedAttributeValue;

/// Describes one owner/link-table pair.
pub(crate) struct LinkTable {
    /// Owner entity name used in errors.
    pub entity: &'static str,
    pub owner_table: &'static str,
    pub table: &'static str,
    pub owner_column: &'static str,
}

pub(crate) const PRODUCT_LINKS: LinkTable = LinkTable {
    entity: "Product",
    owner_table: "products",
    table: "product_attribute_values",
    owner_column: "product_id",
};

pub(crate) const PRODUCT_LINE_LINKS: LinkTable = LinkTable {
    entity: "ProductLine",
    owner_table: "product_lines",
    table: "product_line_attribute_values",
    owner_column: "product_line_id",
};

impl LinkTable {
    /// Link an attribute value to an owner after checking the
    /// one-value-per-attribute rule. Re-linking the same pair is a no-op.
    pub(crate) async fn link(
        &self,
        pool: &PgPool,
        owner_id: DbId,
        attribute_value_id: DbId,
    ) -> Result<LinkCheck, DbError> {
        let mut tx = pool.begin().await?;

        let owner_query = format!("SELECT id FROM {} WHERE id = $1 FOR UPDATE", self.owner_table);
        let owner: Option<(DbId,)> = sqlx::query_as(&owner_query)
            .bind(owner_id)
            .fetch_optional(&mut *tx)
            .await?;
        if owner.is_none() {
            return Err(CoreError::NotFound {
                entity: self.entity,
                id: owner_id,
            }
            .into());
        }

        let value: Option<(DbId,)> =
            sqlx::query_as("SELECT attribute_id FROM attribute_values WHERE id = $1")
                .bind(attribute_value_id)
                .fetch_optional(&mut *tx)
                .await?;
        let (attribute_id,) = value.ok_or(CoreError::NotFound {
            entity: "AttributeValue",
            id: attribute_value_id,
        })?;

        let existing = self.existing_links(&mut *tx, owner_id).await?;
        let candidate = AttributeLink {
            attribute_value_id,
            attribute_id,
        };
        let check = check_attribute_link(self.entity, owner_id, candidate, &existing)?;

        if check == LinkCheck::Insert {
            let insert = format!(
                "INSERT INTO {} ({}, attribute_value_id) VALUES ($1, $2)",
                self.table, self.owner_column
            );
            sqlx::query(&insert)
                .bind(owner_id)
                .bind(attribute_value_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(check)
    }

    /// Remove a link. Returns `true` if the link existed.
    pub(crate) async fn unlink(
        &self,
        pool: &PgPool,
        owner_id: DbId,
        attribute_value_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "DELETE FROM {} WHERE {} = $1 AND attribute_value_id = $2",
            self.table, self.owner_column
        );
        let result = sqlx::query(&query)
            .bind(owner_id)
            .bind(attribute_value_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the values linked to an owner, joined with their attributes.
    pub(crate) async fn list(
        &self,
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<LinkedAttributeValue>, sqlx::Error> {
        let query = format!(
            "SELECT av.id AS attribute_value_id, av.attribute_value, \
                    a.id AS attribute_id, a.name AS attribute_name \
             FROM {} l \
             JOIN attribute_values av ON av.id = l.attribute_value_id \
             JOIN attributes a ON a.id = av.attribute_id \
             WHERE l.{} = $1 \
             ORDER BY a.name, a.id",
            self.table, self.owner_column
        );
        sqlx::query_as::<_, LinkedAttributeValue>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// `attribute_id -> value` map of an owner's links.
    pub(crate) async fn specification(
        &self,
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<BTreeMap<DbId, String>, sqlx::Error> {
        let query = format!(
            "SELECT av.attribute_id, av.attribute_value \
             FROM {} l \
             JOIN attribute_values av ON av.id = l.attribute_value_id \
             WHERE l.{} = $1",
            self.table, self.owner_column
        );
        let rows: Vec<(DbId, String)> = sqlx::query_as(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await?;
        Ok(specification_map(rows.into_iter().map(
            |(attribute_id, value)| SpecificationEntry {
                attribute_id,
                value,
            },
        )))
    }

    async fn existing_links(
        &self,
        conn: &mut PgConnection,
        owner_id: DbId,
    ) -> Result<Vec<AttributeLink>, sqlx::Error> {
        let query = format!(
            "SELECT av.id, av.attribute_id \
             FROM {} l \
             JOIN attribute_values av ON av.id = l.attribute_value_id \
             WHERE l.{} = $1",
            self.table, self.owner_column
        );
        let rows: Vec<(DbId, DbId)> = sqlx::query_as(&query)
            .bind(owner_id)
            .fetch_all(conn)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(attribute_value_id, attribute_id)| AttributeLink {
                attribute_value_id,
                attribute_id,
            })
            .collect())
    }
}
