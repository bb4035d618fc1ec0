use storefront_core::error::CoreError;

/// Error returned by repository methods that validate before writing.
///
/// Domain failures (duplicate order, duplicate attribute, missing parent)
/// are kept apart from driver errors so callers can map them separately.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}
