//! Domain logic for the storefront catalog.
//!
//! Pure, I/O-free building blocks shared by the database and API crates:
//! error types, per-scope ordering, attribute-link rules and field
//! validation for catalog entities.

pub mod attribute;
pub mod catalog;
pub mod error;
pub mod ordering;
pub mod types;
