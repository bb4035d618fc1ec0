use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use storefront_core::error::CoreError;
use storefront_db::DbError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses
/// of the form `{ "error", "code", "field"?, "retryable"? }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `storefront_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Core(core) => AppError::Core(core),
            DbError::Sqlx(sqlx) => AppError::Database(sqlx),
        }
    }
}

/// Everything needed to render an error response.
struct ErrorParts {
    status: StatusCode,
    code: &'static str,
    message: String,
    field: Option<&'static str>,
    retryable: bool,
}

impl ErrorParts {
    fn new(status: StatusCode, code: &'static str, message: String) -> Self {
        Self {
            status,
            code,
            message,
            field: None,
            retryable: false,
        }
    }

    fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An internal error occurred".to_string(),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let parts = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => classify_core_error(core),

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => {
                ErrorParts::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone())
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                ErrorParts::internal()
            }
        };

        let mut body = json!({
            "error": parts.message,
            "code": parts.code,
        });
        if let Some(field) = parts.field {
            body["field"] = json!(field);
        }
        if parts.retryable {
            body["retryable"] = json!(true);
        }

        (parts.status, axum::Json(body)).into_response()
    }
}

fn classify_core_error(core: &CoreError) -> ErrorParts {
    let mut parts = match core {
        CoreError::NotFound { entity, id } => ErrorParts::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => {
            ErrorParts::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
        }
        CoreError::InvalidField { .. } => {
            ErrorParts::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", core.to_string())
        }
        CoreError::DuplicateOrder { .. } => {
            ErrorParts::new(StatusCode::BAD_REQUEST, "DUPLICATE_ORDER", core.to_string())
        }
        CoreError::DuplicateAttribute { .. } => ErrorParts::new(
            StatusCode::BAD_REQUEST,
            "DUPLICATE_ATTRIBUTE",
            core.to_string(),
        ),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            ErrorParts::internal()
        }
    };
    parts.field = core.field();
    parts
}

/// Unique constraints that only fire when two writers computed the same
/// order value concurrently. Retrying recomputes the order.
const ORDER_CONSTRAINTS: &[&str] = &[
    "uq_product_lines_product_order",
    "uq_product_images_line_order",
];

fn is_retryable_constraint(constraint: &str) -> bool {
    ORDER_CONSTRAINTS.contains(&constraint)
}

/// Classify a sqlx error into an HTTP response.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations on `uq_` constraints map to 409. Only the order
///   constraints are marked retryable.
/// - Foreign-key violations map to 409.
/// - CHECK violations map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> ErrorParts {
    match err {
        sqlx::Error::RowNotFound => ErrorParts::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                // unique_violation
                Some("23505") if constraint.starts_with("uq_") => {
                    let mut parts = ErrorParts::new(
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                    parts.retryable = is_retryable_constraint(constraint);
                    parts
                }
                // foreign_key_violation
                Some("23503") => ErrorParts::new(
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Referenced record missing or still in use: {constraint}"),
                ),
                // check_violation
                Some("23514") => ErrorParts::new(
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    format!("Value violates check constraint: {constraint}"),
                ),
                _ => {
                    tracing::error!(error = %db_err, "Database error");
                    ErrorParts::internal()
                }
            }
        }
        other => {
            tracing::error!(error = %other, "Database error");
            ErrorParts::internal()
        }
    }
}
