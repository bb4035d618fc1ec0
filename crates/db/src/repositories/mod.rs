//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Methods writing orderable
//! records or attribute links return [`DbError`](crate::DbError) because
//! they run domain validation before the write.

mod attribute_link;

pub mod attribute_repo;
pub mod brand_repo;
pub mod category_repo;
pub mod product_image_repo;
pub mod product_line_repo;
pub mod product_repo;
pub mod product_type_repo;

pub use attribute_repo::AttributeRepo;
pub use brand_repo::BrandRepo;
pub use category_repo::CategoryRepo;
pub use product_image_repo::ProductImageRepo;
pub use product_line_repo::ProductLineRepo;
pub use product_repo::ProductRepo;
pub use product_type_repo::ProductTypeRepo;
