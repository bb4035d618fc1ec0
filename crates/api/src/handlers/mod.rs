pub mod attribute;
pub mod brand;
pub mod category;
pub mod product;
pub mod product_image;
pub mod product_line;
pub mod product_type;

use storefront_core::catalog::from_validation_errors;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Run the `validator` rules of a request body.
pub(crate) fn validate_input<T: Validate>(input: &T) -> AppResult<()> {
    input
        .validate()
        .map_err(|e| AppError::Core(from_validation_errors(&e)))
}
