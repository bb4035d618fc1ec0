//! Per-scope ordering for sibling records.
//!
//! An orderable record (a product line within its product, an image within
//! its product line) carries an `order` value that is unique among the
//! records sharing the same parent, its *scope*. A new record without an
//! explicit value gets the number after the current maximum in its scope.
//! An explicit value is kept as-is and checked against the siblings.
//!
//! The functions here are pure: callers load the siblings of the scope and
//! run [`OrderingAssigner::pre_save`] before every insert or update. The
//! `MAX + 1` computation is not atomic; concurrent writers in one scope are
//! caught by the `(scope, order)` unique index at commit time.

use crate::error::CoreError;
use crate::types::DbId;

/// First value handed out in an empty scope.
pub const FIRST_ORDER: i32 = 1;

/// An existing record in the scope being ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiblingOrder {
    pub id: DbId,
    pub order: i32,
}

/// How a record's order value was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAssignment {
    /// Computed from the siblings because the caller supplied none.
    Assigned(i32),
    /// Supplied by the caller; subject to uniqueness validation.
    Explicit(i32),
}

impl OrderAssignment {
    pub fn value(self) -> i32 {
        match self {
            OrderAssignment::Assigned(v) | OrderAssignment::Explicit(v) => v,
        }
    }
}

/// Ordering rules for one kind of orderable record.
///
/// Implementors only name the entity and its scope field; the assignment
/// and validation logic is shared.
pub trait OrderingAssigner {
    /// Entity name used in error messages (e.g. `"ProductLine"`).
    const ENTITY: &'static str;

    /// Field holding the reference to the owning parent (e.g. `"product_id"`).
    const SCOPE_FIELD: &'static str;

    /// `max(order) + 1` over the siblings, or [`FIRST_ORDER`] for an empty scope.
    fn next_order(siblings: &[SiblingOrder]) -> Result<i32, CoreError> {
        match siblings.iter().map(|s| s.order).max() {
            None => Ok(FIRST_ORDER),
            Some(max) => max.checked_add(1).ok_or_else(|| CoreError::InvalidField {
                field: "order",
                message: format!("{} order sequence is exhausted", Self::ENTITY),
            }),
        }
    }

    /// Decide the order value for a record about to be written.
    fn assign(
        requested: Option<i32>,
        siblings: &[SiblingOrder],
    ) -> Result<OrderAssignment, CoreError> {
        match requested {
            Some(order) => Ok(OrderAssignment::Explicit(order)),
            None => Self::next_order(siblings).map(OrderAssignment::Assigned),
        }
    }

    /// Reject `order` if a sibling other than `record_id` already holds it.
    ///
    /// `record_id` is `None` for records that have not been persisted yet.
    fn validate(
        record_id: Option<DbId>,
        order: i32,
        siblings: &[SiblingOrder],
    ) -> Result<(), CoreError> {
        validate_order_value(order)?;
        let taken = siblings
            .iter()
            .any(|s| Some(s.id) != record_id && s.order == order);
        if taken {
            return Err(CoreError::DuplicateOrder {
                entity: Self::ENTITY,
                order,
            });
        }
        Ok(())
    }

    /// Pre-save hook: returns the final order value for the record, or the
    /// validation failure that must abort the write.
    fn pre_save(
        record_id: Option<DbId>,
        requested: Option<i32>,
        siblings: &[SiblingOrder],
    ) -> Result<i32, CoreError> {
        match Self::assign(requested, siblings)? {
            OrderAssignment::Assigned(order) => Ok(order),
            OrderAssignment::Explicit(order) => {
                Self::validate(record_id, order, siblings)?;
                Ok(order)
            }
        }
    }
}

/// Order of product lines within their product.
#[derive(Debug, Clone, Copy)]
pub struct ProductLineOrdering;

impl OrderingAssigner for ProductLineOrdering {
    const ENTITY: &'static str = "ProductLine";
    const SCOPE_FIELD: &'static str = "product_id";
}

/// Order of images within their product line.
#[derive(Debug, Clone, Copy)]
pub struct ProductImageOrdering;

impl OrderingAssigner for ProductImageOrdering {
    const ENTITY: &'static str = "ProductImage";
    const SCOPE_FIELD: &'static str = "product_line_id";
}

/// Order values are positive.
pub fn validate_order_value(order: i32) -> Result<(), CoreError> {
    if order < FIRST_ORDER {
        return Err(CoreError::InvalidField {
            field: "order",
            message: format!("must be at least {FIRST_ORDER}, got {order}"),
        });
    }
    Ok(())
}
