//! Integration tests for the one-value-per-attribute rule on product
//! lines and products.

mod common;

use assert_matches::assert_matches;
use common::{new_line, seed_attribute, seed_product};
use sqlx::PgPool;
use storefront_core::attribute::LinkCheck;
use storefront_core::error::CoreError;
use storefront_db::repositories::{AttributeRepo, ProductLineRepo, ProductRepo};
use storefront_db::DbError;

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_value_of_same_attribute_is_rejected(pool: PgPool) {
    let product_id = seed_product(&pool, "p1").await;
    let line = ProductLineRepo::create(&pool, product_id, &new_line("a", None))
        .await
        .unwrap();
    let (colour_id, values) = seed_attribute(&pool, "colour", &["red", "blue"]).await;
    let (red, blue) = (values[0], values[1]);

    let first = ProductLineRepo::link_attribute_value(&pool, line.id, red)
        .await
        .unwrap();
    assert_eq!(first, LinkCheck::Insert);

    let err = ProductLineRepo::link_attribute_value(&pool, line.id, blue)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DbError::Core(CoreError::DuplicateAttribute {
            entity: "ProductLine",
            owner_id,
            attribute_id,
        }) if owner_id == line.id && attribute_id == colour_id
    );

    let linked = ProductLineRepo::list_attribute_values(&pool, line.id)
        .await
        .unwrap();
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].attribute_value, "red");
    assert_eq!(linked[0].attribute_name, "colour");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn relinking_same_value_is_a_no_op(pool: PgPool) {
    let product_id = seed_product(&pool, "p1").await;
    let line = ProductLineRepo::create(&pool, product_id, &new_line("a", None))
        .await
        .unwrap();
    let (_, values) = seed_attribute(&pool, "colour", &["red"]).await;

    ProductLineRepo::link_attribute_value(&pool, line.id, values[0])
        .await
        .unwrap();
    let again = ProductLineRepo::link_attribute_value(&pool, line.id, values[0])
        .await
        .unwrap();
    assert_eq!(again, LinkCheck::AlreadyLinked);

    let linked = ProductLineRepo::list_attribute_values(&pool, line.id)
        .await
        .unwrap();
    assert_eq!(linked.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn values_of_different_attributes_coexist(pool: PgPool) {
    let product_id = seed_product(&pool, "p1").await;
    let line = ProductLineRepo::create(&pool, product_id, &new_line("a", None))
        .await
        .unwrap();
    let (colour_id, colours) = seed_attribute(&pool, "colour", &["red"]).await;
    let (size_id, sizes) = seed_attribute(&pool, "size", &["large"]).await;

    ProductLineRepo::link_attribute_value(&pool, line.id, colours[0])
        .await
        .unwrap();
    ProductLineRepo::link_attribute_value(&pool, line.id, sizes[0])
        .await
        .unwrap();

    let detail = ProductLineRepo::find_detail(&pool, line.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.specification.len(), 2);
    assert_eq!(detail.specification[&colour_id], "red");
    assert_eq!(detail.specification[&size_id], "large");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unlink_frees_the_attribute(pool: PgPool) {
    let product_id = seed_product(&pool, "p1").await;
    let line = ProductLineRepo::create(&pool, product_id, &new_line("a", None))
        .await
        .unwrap();
    let (_, values) = seed_attribute(&pool, "colour", &["red", "blue"]).await;

    ProductLineRepo::link_attribute_value(&pool, line.id, values[0])
        .await
        .unwrap();
    assert!(ProductLineRepo::unlink_attribute_value(&pool, line.id, values[0])
        .await
        .unwrap());
    assert!(!ProductLineRepo::unlink_attribute_value(&pool, line.id, values[0])
        .await
        .unwrap());

    let check = ProductLineRepo::link_attribute_value(&pool, line.id, values[1])
        .await
        .unwrap();
    assert_eq!(check, LinkCheck::Insert);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rule_is_per_owner(pool: PgPool) {
    let product_id = seed_product(&pool, "p1").await;
    let a = ProductLineRepo::create(&pool, product_id, &new_line("a", None))
        .await
        .unwrap();
    let b = ProductLineRepo::create(&pool, product_id, &new_line("b", None))
        .await
        .unwrap();
    let (_, values) = seed_attribute(&pool, "colour", &["red", "blue"]).await;

    ProductLineRepo::link_attribute_value(&pool, a.id, values[0])
        .await
        .unwrap();
    let check = ProductLineRepo::link_attribute_value(&pool, b.id, values[1])
        .await
        .unwrap();
    assert_eq!(check, LinkCheck::Insert);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn product_links_follow_the_same_rule(pool: PgPool) {
    let product_id = seed_product(&pool, "p1").await;
    let (_, values) = seed_attribute(&pool, "material", &["wood", "steel"]).await;

    ProductRepo::link_attribute_value(&pool, product_id, values[0])
        .await
        .unwrap();
    let err = ProductRepo::link_attribute_value(&pool, product_id, values[1])
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DbError::Core(CoreError::DuplicateAttribute {
            entity: "Product",
            ..
        })
    );

    let linked = ProductRepo::list_attribute_values(&pool, product_id)
        .await
        .unwrap();
    assert_eq!(linked.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_owner_or_value_is_not_found(pool: PgPool) {
    let product_id = seed_product(&pool, "p1").await;
    let line = ProductLineRepo::create(&pool, product_id, &new_line("a", None))
        .await
        .unwrap();
    let (_, values) = seed_attribute(&pool, "colour", &["red"]).await;

    let err = ProductLineRepo::link_attribute_value(&pool, 999_999, values[0])
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DbError::Core(CoreError::NotFound {
            entity: "ProductLine",
            ..
        })
    );

    let err = ProductLineRepo::link_attribute_value(&pool, line.id, 999_999)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DbError::Core(CoreError::NotFound {
            entity: "AttributeValue",
            ..
        })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_a_value_removes_its_links(pool: PgPool) {
    let product_id = seed_product(&pool, "p1").await;
    let line = ProductLineRepo::create(&pool, product_id, &new_line("a", None))
        .await
        .unwrap();
    let (_, values) = seed_attribute(&pool, "colour", &["red"]).await;
    ProductLineRepo::link_attribute_value(&pool, line.id, values[0])
        .await
        .unwrap();

    assert!(AttributeRepo::delete_value(&pool, values[0]).await.unwrap());

    let linked = ProductLineRepo::list_attribute_values(&pool, line.id)
        .await
        .unwrap();
    assert!(linked.is_empty());
}
