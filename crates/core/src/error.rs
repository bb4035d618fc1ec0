use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A validation failure attributable to a single input field.
    #[error("Invalid {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },

    /// An explicit order value collides with a sibling in the same scope.
    #[error("{entity} with order {order} already exists")]
    DuplicateOrder { entity: &'static str, order: i32 },

    /// The owner already carries a different value for the same attribute.
    #[error("{entity} {owner_id} already has a value for attribute {attribute_id}")]
    DuplicateAttribute {
        entity: &'static str,
        owner_id: DbId,
        attribute_id: DbId,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Name of the input field a field-level error belongs to, so clients
    /// can display it next to that field.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CoreError::InvalidField { field, .. } => Some(*field),
            CoreError::DuplicateOrder { .. } => Some("order"),
            CoreError::DuplicateAttribute { .. } => Some("attribute_value_id"),
            _ => None,
        }
    }
}
