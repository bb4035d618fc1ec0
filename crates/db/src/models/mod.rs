//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! DTOs derive `validator::Validate` for length limits; cross-field and
//! cross-row rules live in `storefront_core`.

pub mod attribute;
pub mod brand;
pub mod category;
pub mod product;
pub mod product_image;
pub mod product_line;
pub mod product_type;
