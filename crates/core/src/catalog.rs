//! Field validation for catalog entities: slugs, prices, the category
//! hierarchy and validator error formatting.

use std::sync::LazyLock;

use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum length of names, slugs and SKUs.
pub const MAX_NAME_LENGTH: usize = 100;

/// Total digits a price may carry (`NUMERIC(10, 2)`).
pub const PRICE_MAX_DIGITS: u32 = 10;

/// Digits after the decimal point in a price.
pub const PRICE_DECIMAL_PLACES: u32 = 2;

/// Letters, digits, hyphens and underscores.
static SLUG_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[-a-zA-Z0-9_]+$").expect("valid regex"));

/// Validate a URL slug: non-empty, within [`MAX_NAME_LENGTH`], slug charset only.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.len() > MAX_NAME_LENGTH {
        return Err(CoreError::InvalidField {
            field: "slug",
            message: format!("must not exceed {MAX_NAME_LENGTH} characters"),
        });
    }
    if !SLUG_RE.is_match(slug) {
        return Err(CoreError::InvalidField {
            field: "slug",
            message: format!(
                "'{slug}' must consist of letters, numbers, underscores or hyphens"
            ),
        });
    }
    Ok(())
}

/// Validate that a price fits `NUMERIC(10, 2)` and is not negative.
pub fn validate_price(price: Decimal) -> Result<(), CoreError> {
    if price < Decimal::ZERO {
        return Err(CoreError::InvalidField {
            field: "price",
            message: "must not be negative".to_string(),
        });
    }
    if price.normalize().scale() > PRICE_DECIMAL_PLACES {
        return Err(CoreError::InvalidField {
            field: "price",
            message: format!("must have at most {PRICE_DECIMAL_PLACES} decimal places"),
        });
    }
    let integer_digits = PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES;
    if price.trunc() >= Decimal::from(10_i64.pow(integer_digits)) {
        return Err(CoreError::InvalidField {
            field: "price",
            message: format!("must have at most {integer_digits} digits before the decimal point"),
        });
    }
    Ok(())
}

/// Check that placing category `id` under `parent_id` keeps the category
/// tree acyclic.
///
/// `ancestors` is the chain from `parent_id` up to its root, `parent_id`
/// included. Finding `id` on that chain means `parent_id` is the category
/// itself or one of its descendants.
pub fn validate_category_parent(
    id: DbId,
    parent_id: DbId,
    ancestors: &[DbId],
) -> Result<(), CoreError> {
    if parent_id == id {
        return Err(CoreError::InvalidField {
            field: "parent_id",
            message: "a category cannot be its own parent".to_string(),
        });
    }
    if ancestors.contains(&id) {
        return Err(CoreError::InvalidField {
            field: "parent_id",
            message: format!("category {parent_id} is a descendant of category {id}"),
        });
    }
    Ok(())
}

/// Flatten `validator` errors into a single [`CoreError`].
///
/// A single failing field becomes [`CoreError::InvalidField`]; several
/// failures collapse into [`CoreError::Validation`].
pub fn from_validation_errors(errors: &validator::ValidationErrors) -> CoreError {
    let fields = errors.field_errors();
    if fields.len() == 1 {
        if let Some((field, errs)) = fields.into_iter().next() {
            let message = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect::<Vec<_>>()
                .join(", ");
            return CoreError::InvalidField {
                field: known_field(&field),
                message,
            };
        }
    }
    CoreError::Validation(errors.to_string())
}

/// Map validator field names onto the fixed set the API reports.
fn known_field(field: &str) -> &'static str {
    match field {
        "name" => "name",
        "slug" => "slug",
        "sku" => "sku",
        "description" => "description",
        "alternative_text" => "alternative_text",
        "url" => "url",
        "attribute_value" => "attribute_value",
        "stock_qty" => "stock_qty",
        _ => "input",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::str::FromStr;
    use validator::Validate;

    #[test]
    fn accepts_plain_slug() {
        assert!(validate_slug("red-shoe_2").is_ok());
    }

    #[test]
    fn rejects_slug_with_spaces() {
        assert_matches!(
            validate_slug("red shoe"),
            Err(CoreError::InvalidField { field: "slug", .. })
        );
    }

    #[test]
    fn rejects_empty_and_long_slugs() {
        assert!(validate_slug("").is_err());
        assert!(validate_slug(&"a".repeat(MAX_NAME_LENGTH + 1)).is_err());
        assert!(validate_slug(&"a".repeat(MAX_NAME_LENGTH)).is_ok());
    }

    #[test]
    fn price_bounds() {
        assert!(validate_price(Decimal::from_str("10.00").unwrap()).is_ok());
        assert!(validate_price(Decimal::from_str("99999999.99").unwrap()).is_ok());
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert_matches!(
            validate_price(Decimal::from_str("100000000.00").unwrap()),
            Err(CoreError::InvalidField { field: "price", .. })
        );
        assert_matches!(
            validate_price(Decimal::from_str("1.005").unwrap()),
            Err(CoreError::InvalidField { field: "price", .. })
        );
        assert_matches!(
            validate_price(Decimal::from_str("-1").unwrap()),
            Err(CoreError::InvalidField { field: "price", .. })
        );
    }

    #[test]
    fn category_parent_must_not_be_self_or_descendant() {
        // Tree: 1 -> 2 -> 3, plus an unrelated root 9.
        assert!(validate_category_parent(3, 9, &[9]).is_ok());
        assert!(validate_category_parent(2, 1, &[1]).is_ok());
        assert_matches!(
            validate_category_parent(2, 2, &[2, 1]),
            Err(CoreError::InvalidField { field: "parent_id", .. })
        );
        assert_matches!(
            validate_category_parent(1, 3, &[3, 2, 1]),
            Err(CoreError::InvalidField { field: "parent_id", .. })
        );
    }

    #[derive(Validate)]
    struct Named {
        #[validate(length(min = 1, max = 100))]
        name: String,
    }

    #[derive(Validate)]
    struct TwoFields {
        #[validate(length(min = 1))]
        name: String,
        #[validate(length(min = 1))]
        sku: String,
    }

    #[test]
    fn single_field_error_keeps_field_name() {
        let errors = Named {
            name: String::new(),
        }
        .validate()
        .unwrap_err();
        assert_matches!(
            from_validation_errors(&errors),
            CoreError::InvalidField { field: "name", .. }
        );
    }

    #[test]
    fn multiple_field_errors_collapse() {
        let errors = TwoFields {
            name: String::new(),
            sku: String::new(),
        }
        .validate()
        .unwrap_err();
        assert_matches!(from_validation_errors(&errors), CoreError::Validation(_));
    }
}
