//! Fixtures shared by the repository integration tests.

#![allow(dead_code)]

use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::PgPool;
use storefront_db::models::attribute::{CreateAttribute, CreateAttributeValue};
use storefront_db::models::brand::CreateBrand;
use storefront_db::models::product::CreateProduct;
use storefront_db::models::product_image::CreateProductImage;
use storefront_db::models::product_line::CreateProductLine;
use storefront_db::models::product_type::CreateProductType;
use storefront_db::repositories::{AttributeRepo, BrandRepo, ProductRepo, ProductTypeRepo};

pub fn price(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn new_line(sku: &str, order: Option<i32>) -> CreateProductLine {
    CreateProductLine {
        price: price("10.00"),
        sku: sku.to_string(),
        stock_qty: 10,
        is_active: Some(true),
        order,
    }
}

pub fn new_image(alt: &str, order: Option<i32>) -> CreateProductImage {
    CreateProductImage {
        alternative_text: alt.to_string(),
        url: None,
        order,
    }
}

/// Create a brand, a product type and an active product with the given slug.
pub async fn seed_product(pool: &PgPool, slug: &str) -> i64 {
    let brand = BrandRepo::create(
        pool,
        &CreateBrand {
            name: format!("brand_{slug}"),
            is_active: Some(true),
        },
    )
    .await
    .unwrap();
    let product_type = ProductTypeRepo::create(
        pool,
        &CreateProductType {
            name: format!("type_{slug}"),
            attribute_ids: vec![],
        },
    )
    .await
    .unwrap();
    let product = ProductRepo::create(
        pool,
        &CreateProduct {
            name: format!("product {slug}"),
            slug: slug.to_string(),
            description: None,
            is_digital: None,
            brand_id: brand.id,
            category_id: None,
            product_type_id: product_type.id,
            is_active: Some(true),
        },
    )
    .await
    .unwrap();
    product.id
}

/// Create an attribute with the given values; returns `(attribute_id, value_ids)`.
pub async fn seed_attribute(pool: &PgPool, name: &str, values: &[&str]) -> (i64, Vec<i64>) {
    let attribute = AttributeRepo::create(
        pool,
        &CreateAttribute {
            name: name.to_string(),
            description: None,
        },
    )
    .await
    .unwrap();
    let mut ids = Vec::with_capacity(values.len());
    for value in values {
        let v = AttributeRepo::create_value(
            pool,
            attribute.id,
            &CreateAttributeValue {
                attribute_value: value.to_string(),
            },
        )
        .await
        .unwrap();
        ids.push(v.id);
    }
    (attribute.id, ids)
}
