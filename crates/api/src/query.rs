//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for list endpoints that support an `include_inactive` flag.
///
/// Used by categories, brands and product lines. Product listing has its
/// own parameters with a category filter.
#[derive(Debug, Deserialize)]
pub struct IncludeInactiveParams {
    #[serde(default)]
    pub include_inactive: bool,
}
