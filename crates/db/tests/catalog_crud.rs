//! CRUD and read-model tests for the catalog repositories.

mod common;

use common::{new_image, new_line, seed_attribute, seed_product};
use assert_matches::assert_matches;
use sqlx::PgPool;
use storefront_core::error::CoreError;
use storefront_db::models::category::{CreateCategory, UpdateCategory};
use storefront_db::models::product::{ProductListParams, UpdateProduct};
use storefront_db::models::product_line::UpdateProductLine;
use storefront_db::models::product_type::{CreateProductType, UpdateProductType};
use storefront_db::DbError;
use storefront_db::repositories::{
    CategoryRepo, ProductImageRepo, ProductLineRepo, ProductRepo, ProductTypeRepo,
};

fn category(name: &str, slug: &str, parent_id: Option<i64>, active: bool) -> CreateCategory {
    CreateCategory {
        name: name.to_string(),
        slug: slug.to_string(),
        parent_id,
        is_active: Some(active),
    }
}

fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    err.as_database_error()
        .map(|e| e.code().as_deref() == Some("23505") && e.constraint() == Some(constraint))
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn category_tree_and_active_filter(pool: PgPool) {
    let root = CategoryRepo::create(&pool, &category("Furniture", "furniture", None, true))
        .await
        .unwrap();
    CategoryRepo::create(&pool, &category("Chairs", "chairs", Some(root.id), true))
        .await
        .unwrap();
    CategoryRepo::create(&pool, &category("Desks", "desks", Some(root.id), false))
        .await
        .unwrap();

    let children = CategoryRepo::list_children(&pool, root.id).await.unwrap();
    let names: Vec<&str> = children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Chairs", "Desks"]);

    let active = CategoryRepo::list(&pool, false).await.unwrap();
    assert_eq!(active.len(), 2);
    assert!(active.iter().all(|c| c.is_active));

    let all = CategoryRepo::list(&pool, true).await.unwrap();
    assert_eq!(all.len(), 3);

    let found = CategoryRepo::find_by_slug(&pool, "chairs").await.unwrap().unwrap();
    assert_eq!(found.parent_id, Some(root.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn category_name_and_slug_are_unique(pool: PgPool) {
    CategoryRepo::create(&pool, &category("Chairs", "chairs", None, true))
        .await
        .unwrap();

    let err = CategoryRepo::create(&pool, &category("Chairs", "other", None, true))
        .await
        .unwrap_err();
    assert!(is_unique_violation(&err, "uq_categories_name"));

    let err = CategoryRepo::create(&pool, &category("Other", "chairs", None, true))
        .await
        .unwrap_err();
    assert!(is_unique_violation(&err, "uq_categories_slug"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn category_partial_update(pool: PgPool) {
    let created = CategoryRepo::create(&pool, &category("Chairs", "chairs", None, false))
        .await
        .unwrap();

    let updated = CategoryRepo::update(
        &pool,
        created.id,
        &UpdateCategory {
            name: None,
            slug: None,
            parent_id: None,
            is_active: Some(true),
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.name, "Chairs");
    assert!(updated.is_active);
    assert!(updated.updated_at >= created.updated_at);
}

fn move_to(parent_id: i64) -> UpdateCategory {
    UpdateCategory {
        name: None,
        slug: None,
        parent_id: Some(parent_id),
        is_active: None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn category_cannot_move_under_its_descendant(pool: PgPool) {
    let a = CategoryRepo::create(&pool, &category("A", "a", None, true))
        .await
        .unwrap();
    let b = CategoryRepo::create(&pool, &category("B", "b", Some(a.id), true))
        .await
        .unwrap();
    let c = CategoryRepo::create(&pool, &category("C", "c", Some(b.id), true))
        .await
        .unwrap();

    let mut conn = pool.acquire().await.unwrap();
    let chain = CategoryRepo::ancestor_ids(&mut *conn, c.id).await.unwrap();
    assert_eq!(chain, vec![c.id, b.id, a.id]);
    drop(conn);

    let err = CategoryRepo::update(&pool, a.id, &move_to(b.id))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DbError::Core(CoreError::InvalidField { field: "parent_id", .. })
    );

    let err = CategoryRepo::update(&pool, a.id, &move_to(c.id))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DbError::Core(CoreError::InvalidField { field: "parent_id", .. })
    );

    let err = CategoryRepo::update(&pool, a.id, &move_to(a.id))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DbError::Core(CoreError::InvalidField { field: "parent_id", .. })
    );

    let unchanged = CategoryRepo::find_by_id(&pool, a.id).await.unwrap().unwrap();
    assert_eq!(unchanged.parent_id, None);
    assert!(CategoryRepo::list_children(&pool, c.id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn category_can_move_to_another_branch(pool: PgPool) {
    let a = CategoryRepo::create(&pool, &category("A", "a", None, true))
        .await
        .unwrap();
    let b = CategoryRepo::create(&pool, &category("B", "b", Some(a.id), true))
        .await
        .unwrap();
    let other = CategoryRepo::create(&pool, &category("Other", "other", None, true))
        .await
        .unwrap();

    let moved = CategoryRepo::update(&pool, b.id, &move_to(other.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.parent_id, Some(other.id));

    // A former ancestor may now sit below its old child.
    let moved = CategoryRepo::update(&pool, a.id, &move_to(b.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.parent_id, Some(b.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn category_with_children_cannot_be_deleted(pool: PgPool) {
    let root = CategoryRepo::create(&pool, &category("Furniture", "furniture", None, true))
        .await
        .unwrap();
    CategoryRepo::create(&pool, &category("Chairs", "chairs", Some(root.id), true))
        .await
        .unwrap();

    let err = CategoryRepo::delete(&pool, root.id).await.unwrap_err();
    let code = err.as_database_error().and_then(|e| e.code().map(|c| c.to_string()));
    assert_eq!(code.as_deref(), Some("23503"));
}

// ---------------------------------------------------------------------------
// Product types
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn product_type_attribute_set_is_replaced_on_update(pool: PgPool) {
    let (colour, _) = seed_attribute(&pool, "colour", &[]).await;
    let (size, _) = seed_attribute(&pool, "size", &[]).await;

    let product_type = ProductTypeRepo::create(
        &pool,
        &CreateProductType {
            name: "Shirt".to_string(),
            attribute_ids: vec![colour],
        },
    )
    .await
    .unwrap();

    ProductTypeRepo::update(
        &pool,
        product_type.id,
        &UpdateProductType {
            name: None,
            attribute_ids: Some(vec![size]),
        },
    )
    .await
    .unwrap()
    .unwrap();

    let with_attributes = ProductTypeRepo::find_by_id_with_attributes(&pool, product_type.id)
        .await
        .unwrap()
        .unwrap();
    let ids: Vec<i64> = with_attributes.attributes.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![size]);
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn product_list_filters_inactive_and_category(pool: PgPool) {
    let chairs = CategoryRepo::create(&pool, &category("Chairs", "chairs", None, true))
        .await
        .unwrap();
    let a = seed_product(&pool, "armchair").await;
    let b = seed_product(&pool, "bench").await;

    ProductRepo::update(
        &pool,
        a,
        &UpdateProduct {
            category_id: Some(Some(chairs.id)),
            ..empty_product_update()
        },
    )
    .await
    .unwrap();
    ProductRepo::update(
        &pool,
        b,
        &UpdateProduct {
            is_active: Some(false),
            ..empty_product_update()
        },
    )
    .await
    .unwrap();

    let active = ProductRepo::list(&pool, &ProductListParams::default())
        .await
        .unwrap();
    assert_eq!(active.iter().map(|p| p.id).collect::<Vec<_>>(), vec![a]);

    let all = ProductRepo::list(
        &pool,
        &ProductListParams {
            include_inactive: true,
            category: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(all.len(), 2);

    let in_chairs = ProductRepo::list(
        &pool,
        &ProductListParams {
            include_inactive: true,
            category: Some("chairs".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(in_chairs.iter().map(|p| p.id).collect::<Vec<_>>(), vec![a]);

    let unknown = ProductRepo::list(
        &pool,
        &ProductListParams {
            include_inactive: true,
            category: Some("nope".to_string()),
        },
    )
    .await
    .unwrap();
    assert!(unknown.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn product_detail_nests_lines_images_and_specifications(pool: PgPool) {
    let product_id = seed_product(&pool, "desk").await;
    let (colour, colours) = seed_attribute(&pool, "colour", &["oak"]).await;

    let product = ProductRepo::find_by_id(&pool, product_id).await.unwrap().unwrap();
    ProductTypeRepo::update(
        &pool,
        product.product_type_id,
        &UpdateProductType {
            name: None,
            attribute_ids: Some(vec![colour]),
        },
    )
    .await
    .unwrap();

    let second = ProductLineRepo::create(&pool, product_id, &new_line("b", Some(2)))
        .await
        .unwrap();
    let first = ProductLineRepo::create(&pool, product_id, &new_line("a", Some(1)))
        .await
        .unwrap();
    ProductImageRepo::create(&pool, first.id, &new_image("top", None))
        .await
        .unwrap();
    ProductLineRepo::link_attribute_value(&pool, first.id, colours[0])
        .await
        .unwrap();
    ProductLineRepo::update(
        &pool,
        second.id,
        &UpdateProductLine {
            price: None,
            sku: None,
            stock_qty: None,
            is_active: Some(false),
            order: None,
        },
    )
    .await
    .unwrap();

    let detail = ProductRepo::find_detail_by_slug(&pool, "desk")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(detail.header.brand_name, "brand_desk");
    assert_eq!(detail.header.category_name, None);
    assert_eq!(detail.type_specification[&colour], "colour");

    let skus: Vec<&str> = detail.product_line.iter().map(|l| l.line.sku.as_str()).collect();
    assert_eq!(skus, vec!["a", "b"], "lines are in order, inactive included");
    assert_eq!(detail.product_line[0].product_image.len(), 1);
    assert_eq!(detail.product_line[0].specification[&colour], "oak");
    assert!(detail.product_line[1].specification.is_empty());

    assert!(ProductRepo::find_detail_by_slug(&pool, "missing")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_product_cascades_to_lines_and_images(pool: PgPool) {
    let product_id = seed_product(&pool, "desk").await;
    let line = ProductLineRepo::create(&pool, product_id, &new_line("a", None))
        .await
        .unwrap();
    let image = ProductImageRepo::create(&pool, line.id, &new_image("top", None))
        .await
        .unwrap();

    assert!(ProductRepo::delete(&pool, product_id).await.unwrap());

    assert!(ProductLineRepo::find_by_id(&pool, line.id).await.unwrap().is_none());
    assert!(ProductImageRepo::find_by_id(&pool, image.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn product_slug_is_unique(pool: PgPool) {
    seed_product(&pool, "desk").await;
    let other = seed_product(&pool, "chair").await;

    let err = ProductRepo::update(
        &pool,
        other,
        &UpdateProduct {
            slug: Some("desk".to_string()),
            ..empty_product_update()
        },
    )
    .await
    .unwrap_err();
    assert!(is_unique_violation(&err, "uq_products_slug"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn product_category_can_be_cleared(pool: PgPool) {
    let chairs = CategoryRepo::create(&pool, &category("Chairs", "chairs", None, true))
        .await
        .unwrap();
    let id = seed_product(&pool, "stool").await;

    let placed = ProductRepo::update(
        &pool,
        id,
        &UpdateProduct {
            category_id: Some(Some(chairs.id)),
            ..empty_product_update()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(placed.category_id, Some(chairs.id));

    let renamed = ProductRepo::update(
        &pool,
        id,
        &UpdateProduct {
            name: Some("Bar stool".to_string()),
            ..empty_product_update()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(renamed.category_id, Some(chairs.id), "absent key keeps the category");

    let cleared = ProductRepo::update(
        &pool,
        id,
        &UpdateProduct {
            category_id: Some(None),
            ..empty_product_update()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(cleared.category_id, None);
    assert_eq!(cleared.name, "Bar stool");
}

fn empty_product_update() -> UpdateProduct {
    UpdateProduct {
        name: None,
        slug: None,
        description: None,
        is_digital: None,
        brand_id: None,
        category_id: None,
        product_type_id: None,
        is_active: None,
    }
}
