//! Database side of the ordering pre-save hook.
//!
//! Binds each [`OrderingAssigner`] to the table it orders and loads the
//! siblings of a scope so the pure assignment logic in `storefront_core`
//! can run inside the writer's transaction.

use sqlx::PgConnection;
use storefront_core::ordering::{
    OrderingAssigner, ProductImageOrdering, ProductLineOrdering, SiblingOrder,
};
use storefront_core::types::DbId;

use crate::error::DbError;

/// An ordering rule bound to its table. The scope column is
/// [`OrderingAssigner::SCOPE_FIELD`] and the order column is `sort_order`.
pub trait OrderedTable: OrderingAssigner {
    const TABLE: &'static str;
}

impl OrderedTable for ProductLineOrdering {
    const TABLE: &'static str = "product_lines";
}

impl OrderedTable for ProductImageOrdering {
    const TABLE: &'static str = "product_images";
}

/// Load every record in the scope, highest order first.
///
/// A `None` scope matches nothing, so a record without a parent sees an
/// empty scope.
pub async fn sibling_orders<T: OrderedTable>(
    conn: &mut PgConnection,
    scope_id: Option<DbId>,
) -> Result<Vec<SiblingOrder>, sqlx::Error> {
    let query = format!(
        "SELECT id, sort_order FROM {} WHERE {} = $1 ORDER BY sort_order DESC",
        T::TABLE,
        T::SCOPE_FIELD
    );
    let rows: Vec<(DbId, i32)> = sqlx::query_as(&query)
        .bind(scope_id)
        .fetch_all(conn)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(id, order)| SiblingOrder { id, order })
        .collect())
}

/// Run the pre-save hook for a record about to be written in `scope_id`.
///
/// `record_id` is the id of the record being updated, `None` on insert.
/// Returns the order value to persist.
pub async fn resolve_order<T: OrderedTable>(
    conn: &mut PgConnection,
    scope_id: Option<DbId>,
    record_id: Option<DbId>,
    requested: Option<i32>,
) -> Result<i32, DbError> {
    let siblings = sibling_orders::<T>(conn, scope_id).await?;
    let order = T::pre_save(record_id, requested, &siblings)?;
    tracing::debug!(
        entity = T::ENTITY,
        scope_id,
        record_id,
        order,
        explicit = requested.is_some(),
        "Resolved order value"
    );
    Ok(order)
}
