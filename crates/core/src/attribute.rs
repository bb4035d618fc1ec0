//! Attribute-link rules.
//!
//! Product lines (and products) are described by attribute values such as
//! "red" for the attribute "color". An owner may carry at most one value
//! per attribute, otherwise its specification map would be ambiguous.

use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::types::DbId;

/// An attribute value as seen through an owner's link table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeLink {
    pub attribute_value_id: DbId,
    pub attribute_id: DbId,
}

/// Outcome of checking a new link against an owner's existing links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkCheck {
    /// The link is new and may be inserted.
    Insert,
    /// The exact pair already exists; saving it again is a no-op.
    AlreadyLinked,
}

/// Check whether `candidate` may be linked to the owner holding `existing`.
///
/// Re-saving the exact (owner, value) pair is accepted. A different value
/// of an attribute the owner already has is rejected.
pub fn check_attribute_link(
    entity: &'static str,
    owner_id: DbId,
    candidate: AttributeLink,
    existing: &[AttributeLink],
) -> Result<LinkCheck, CoreError> {
    if existing
        .iter()
        .any(|l| l.attribute_value_id == candidate.attribute_value_id)
    {
        return Ok(LinkCheck::AlreadyLinked);
    }
    if existing
        .iter()
        .any(|l| l.attribute_id == candidate.attribute_id)
    {
        return Err(CoreError::DuplicateAttribute {
            entity,
            owner_id,
            attribute_id: candidate.attribute_id,
        });
    }
    Ok(LinkCheck::Insert)
}

/// A named attribute value, ready to be folded into a specification map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecificationEntry {
    pub attribute_id: DbId,
    pub value: String,
}

/// Fold attribute entries into an `attribute_id -> value` map.
///
/// Later entries win, but the link rule above guarantees one value per
/// attribute for persisted data.
pub fn specification_map(
    entries: impl IntoIterator<Item = SpecificationEntry>,
) -> BTreeMap<DbId, String> {
    entries
        .into_iter()
        .map(|e| (e.attribute_id, e.value))
        .collect()
}
