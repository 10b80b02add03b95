use std::collections::HashSet;

use catalog_query_api::{
    config::PoolSettings,
    cursor,
    db::{Database, run_migrations},
    error::AppError,
    query::{ProductQueryParams, ProductSort, ProductType, SortOrder},
    services::{category_service, product_service, shop_service},
    state::AppState,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serial_test::serial;
use sqlx::PgPool;
use uuid::Uuid;

struct Seeded {
    seller_id: Uuid,
    other_seller_id: Uuid,
    category_id: i32,
}

struct NewProduct<'a> {
    name: &'a str,
    price: &'a str,
    product_type: &'a str,
    seller_id: Uuid,
    category_id: Option<i32>,
    created_at: DateTime<Utc>,
}

// Allow skipping when no DB is configured in the environment.
async fn state_or_skip() -> anyhow::Result<Option<(AppState, Seeded)>> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run listing flow tests."
            );
            return Ok(None);
        }
    };

    let db = Database::connect(&database_url, PoolSettings::default()).await?;
    run_migrations(&db.orm()).await?;

    let pool = db.pool();
    sqlx::query(
        "TRUNCATE TABLE product_options, product_images, inventory, foods, medicines, toys, \
         shelters, products, categories, sellers RESTART IDENTITY CASCADE",
    )
    .execute(&pool)
    .await?;

    let seller_id = insert_seller(&pool, "Happy Paws").await?;
    let other_seller_id = insert_seller(&pool, "Pet Corner").await?;
    let (category_id,): (i32,) =
        sqlx::query_as("INSERT INTO categories (name) VALUES ('Toys') RETURNING category_id")
            .fetch_one(&pool)
            .await?;

    Ok(Some((
        AppState::new(db),
        Seeded {
            seller_id,
            other_seller_id,
            category_id,
        },
    )))
}

async fn insert_seller(pool: &PgPool, name: &str) -> anyhow::Result<Uuid> {
    let (id,): (Uuid,) =
        sqlx::query_as("INSERT INTO sellers (name) VALUES ($1) RETURNING seller_id")
            .bind(name)
            .fetch_one(pool)
            .await?;
    Ok(id)
}

async fn insert_product(pool: &PgPool, p: NewProduct<'_>) -> anyhow::Result<Uuid> {
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO products (name, price, product_type, seller_id, category_id, created_at, updated_at)
        VALUES ($1, $2::NUMERIC, $3, $4, $5, $6, $6)
        RETURNING product_id
        "#,
    )
    .bind(p.name)
    .bind(p.price)
    .bind(p.product_type)
    .bind(p.seller_id)
    .bind(p.category_id)
    .bind(p.created_at)
    .fetch_one(pool)
    .await?;

    sqlx::query("INSERT INTO inventory (product_id, quantity) VALUES ($1, 10)")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(id)
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
}

/// Follow `next_cursor` until the end and return every id seen, in order.
async fn walk(state: &AppState, params: ProductQueryParams) -> anyhow::Result<(Vec<Uuid>, usize)> {
    let mut ids = Vec::new();
    let mut pages = 0;
    let mut params = params;
    loop {
        let page = product_service::fetch_product_page(state, &params).await?;
        pages += 1;
        assert!((page.items.len() as i64) <= page.limit);
        ids.extend(page.items.iter().map(|item| item.product.id));
        if page.next_cursor.is_empty() {
            break;
        }
        params.cursor = Some(page.next_cursor);
        assert!(pages < 100, "pagination did not terminate");
    }
    Ok((ids, pages))
}

#[tokio::test]
#[serial]
async fn twenty_five_products_span_two_default_pages() -> anyhow::Result<()> {
    let Some((state, seeded)) = state_or_skip().await? else {
        return Ok(());
    };
    let pool = state.db.pool();
    for i in 0..25 {
        insert_product(
            &pool,
            NewProduct {
                name: &format!("Chew Toy {i:02}"),
                price: &format!("{}.50", 10 + i),
                product_type: "toy",
                seller_id: seeded.seller_id,
                category_id: Some(seeded.category_id),
                created_at: base_time() + Duration::minutes(i),
            },
        )
        .await?;
    }

    let first = product_service::list_products(&state, ProductQueryParams::default())
        .await?
        .data
        .expect("first page");
    assert_eq!(first.limit, 20);
    assert_eq!(first.items.len(), 20);
    assert!(!first.next_cursor.is_empty());

    let last_returned = &first.items[19].product;
    let decoded = cursor::decode(&first.next_cursor).unwrap();
    assert_eq!(decoded.product_id, last_returned.id);
    assert_eq!(decoded.created_at, last_returned.created_at);

    let second = product_service::fetch_product_page(
        &state,
        &ProductQueryParams {
            cursor: Some(first.next_cursor.clone()),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(second.items.len(), 5);
    assert_eq!(second.next_cursor, "");

    let prices: Vec<f64> = first
        .items
        .iter()
        .chain(second.items.iter())
        .map(|item| item.product.price)
        .collect();
    let mut sorted = prices.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(prices, sorted);
    assert_eq!(prices.len(), 25);

    let item = &first.items[0];
    assert_eq!(item.categories.len(), 1);
    assert_eq!(item.categories[0].name, "Toys");
    assert_eq!(item.inventory.as_ref().map(|i| i.quantity), Some(10));
    Ok(())
}

#[tokio::test]
#[serial]
async fn exact_and_one_extra_row_boundaries() -> anyhow::Result<()> {
    let Some((state, seeded)) = state_or_skip().await? else {
        return Ok(());
    };
    let pool = state.db.pool();
    let mut ids = Vec::new();
    for i in 0..6 {
        ids.push(
            insert_product(
                &pool,
                NewProduct {
                    name: &format!("Boundary {i}"),
                    price: "5.00",
                    product_type: "food",
                    seller_id: seeded.seller_id,
                    category_id: None,
                    created_at: base_time() + Duration::seconds(i),
                },
            )
            .await?,
        );
    }

    let by_created = |limit| ProductQueryParams {
        limit: Some(limit),
        sort: ProductSort::CreatedAt,
        ..Default::default()
    };

    let exact = product_service::fetch_product_page(&state, &by_created(6)).await?;
    assert_eq!(exact.items.len(), 6);
    assert_eq!(exact.next_cursor, "");

    let extra = product_service::fetch_product_page(&state, &by_created(5)).await?;
    assert_eq!(extra.items.len(), 5);
    let decoded = cursor::decode(&extra.next_cursor).unwrap();
    assert_eq!(decoded.product_id, ids[4]);
    assert_eq!(decoded.created_at, base_time() + Duration::seconds(4));
    Ok(())
}

#[tokio::test]
#[serial]
async fn pages_never_repeat_or_skip_rows_with_tied_sort_values() -> anyhow::Result<()> {
    let Some((state, seeded)) = state_or_skip().await? else {
        return Ok(());
    };
    let pool = state.db.pool();
    let prices = ["3.00", "7.25", "7.25", "12.00"];
    let mut expected: Vec<(f64, Uuid, String)> = Vec::new();
    for i in 0..23 {
        let price = prices[i % prices.len()];
        let name = format!("Item {:02}", i % 5);
        let id = insert_product(
            &pool,
            NewProduct {
                name: &name,
                price,
                product_type: "toy",
                seller_id: seeded.seller_id,
                category_id: Some(seeded.category_id),
                // Identical timestamps on purpose: only the id breaks ties.
                created_at: base_time(),
            },
        )
        .await?;
        expected.push((price.parse()?, id, name));
    }

    // price DESC, id ASC
    let mut by_price = expected.clone();
    by_price.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap().then(a.1.cmp(&b.1)));
    let (ids, pages) = walk(
        &state,
        ProductQueryParams {
            limit: Some(4),
            sort: ProductSort::Price,
            order: SortOrder::Desc,
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(pages, 6);
    assert_eq!(ids, by_price.iter().map(|e| e.1).collect::<Vec<_>>());

    // name ASC, id ASC
    let mut by_name = expected.clone();
    by_name.sort_by(|a, b| a.2.cmp(&b.2).then(a.1.cmp(&b.1)));
    let (ids, _) = walk(
        &state,
        ProductQueryParams {
            limit: Some(7),
            sort: ProductSort::Name,
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(ids, by_name.iter().map(|e| e.1).collect::<Vec<_>>());

    // name DESC, id ASC
    let mut by_name_desc = expected.clone();
    by_name_desc.sort_by(|a, b| b.2.cmp(&a.2).then(a.1.cmp(&b.1)));
    let (ids, _) = walk(
        &state,
        ProductQueryParams {
            limit: Some(3),
            sort: ProductSort::Name,
            order: SortOrder::Desc,
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(ids, by_name_desc.iter().map(|e| e.1).collect::<Vec<_>>());

    // created_at ASC with a shared timestamp reduces to id ASC
    let mut by_id = expected.iter().map(|e| e.1).collect::<Vec<_>>();
    by_id.sort();
    let (ids, pages) = walk(
        &state,
        ProductQueryParams {
            limit: Some(1),
            sort: ProductSort::CreatedAt,
            order: SortOrder::Asc,
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(pages, 23);
    assert_eq!(ids, by_id);

    // created_at DESC, every row shares the timestamp
    let (ids, _) = walk(
        &state,
        ProductQueryParams {
            limit: Some(5),
            sort: ProductSort::CreatedAt,
            order: SortOrder::Desc,
            ..Default::default()
        },
    )
    .await?;
    let unique: HashSet<Uuid> = ids.iter().copied().collect();
    assert_eq!(ids.len(), 23);
    assert_eq!(unique.len(), 23);
    Ok(())
}

#[tokio::test]
#[serial]
async fn filters_search_and_determinism() -> anyhow::Result<()> {
    let Some((state, seeded)) = state_or_skip().await? else {
        return Ok(());
    };
    let pool = state.db.pool();
    let shoe = insert_product(
        &pool,
        NewProduct {
            name: "Red Shoe",
            price: "19.99",
            product_type: "toy",
            seller_id: seeded.seller_id,
            category_id: Some(seeded.category_id),
            created_at: base_time(),
        },
    )
    .await?;
    let kibble = insert_product(
        &pool,
        NewProduct {
            name: "Salmon Kibble",
            price: "24.50",
            product_type: "food",
            seller_id: seeded.other_seller_id,
            category_id: None,
            created_at: base_time() + Duration::minutes(1),
        },
    )
    .await?;

    for term in ["redshoe", "Red  Shoe", "RED SHOE", "d s"] {
        let page = product_service::fetch_product_page(
            &state,
            &ProductQueryParams {
                search: Some(term.into()),
                ..Default::default()
            },
        )
        .await?;
        let ids: Vec<Uuid> = page.items.iter().map(|i| i.product.id).collect();
        assert_eq!(ids, vec![shoe], "search term {term:?}");
    }

    let only = |params: ProductQueryParams| {
        let state = state.clone();
        async move {
            let page = product_service::fetch_product_page(&state, &params).await?;
            Ok::<_, AppError>(page.items.iter().map(|i| i.product.id).collect::<Vec<_>>())
        }
    };
    assert_eq!(
        only(ProductQueryParams {
            category_id: Some(seeded.category_id),
            ..Default::default()
        })
        .await?,
        vec![shoe]
    );
    assert_eq!(
        only(ProductQueryParams {
            seller_id: Some(seeded.other_seller_id),
            ..Default::default()
        })
        .await?,
        vec![kibble]
    );
    assert_eq!(
        only(ProductQueryParams {
            product_type: Some(ProductType::Food),
            ..Default::default()
        })
        .await?,
        vec![kibble]
    );

    let params = ProductQueryParams {
        limit: Some(1),
        ..Default::default()
    };
    let a = product_service::fetch_product_page(&state, &params).await?;
    let b = product_service::fetch_product_page(&state, &params).await?;
    assert_eq!(serde_json::to_value(&a)?, serde_json::to_value(&b)?);
    assert!(!a.next_cursor.is_empty());
    Ok(())
}

#[tokio::test]
#[serial]
async fn search_matches_names_with_non_ascii_spaces() -> anyhow::Result<()> {
    let Some((state, seeded)) = state_or_skip().await? else {
        return Ok(());
    };
    let pool = state.db.pool();
    let mut ids = Vec::new();
    for (i, name) in ["Blue\u{00A0}Boot", "Green\u{3000}Hat", "Grey\u{2009}Collar"]
        .into_iter()
        .enumerate()
    {
        ids.push(
            insert_product(
                &pool,
                NewProduct {
                    name,
                    price: "9.00",
                    product_type: "toy",
                    seller_id: seeded.seller_id,
                    category_id: None,
                    created_at: base_time() + Duration::minutes(i as i64),
                },
            )
            .await?,
        );
    }

    let cases = [
        ("Blue\u{00A0}Boot", ids[0]),
        ("blueboot", ids[0]),
        ("Blue Boot", ids[0]),
        ("Green\u{3000}Hat", ids[1]),
        ("green hat", ids[1]),
        ("Grey\u{2009}Collar", ids[2]),
        ("greycollar", ids[2]),
    ];
    for (term, expected) in cases {
        let page = product_service::fetch_product_page(
            &state,
            &ProductQueryParams {
                search: Some(term.into()),
                ..Default::default()
            },
        )
        .await?;
        let found: Vec<Uuid> = page.items.iter().map(|i| i.product.id).collect();
        assert_eq!(found, vec![expected], "search term {term:?}");
    }
    Ok(())
}

#[tokio::test]
#[serial]
async fn enrichment_and_lookups() -> anyhow::Result<()> {
    let Some((state, seeded)) = state_or_skip().await? else {
        return Ok(());
    };
    let pool = state.db.pool();
    let id = insert_product(
        &pool,
        NewProduct {
            name: "Rope Tug",
            price: "7.80",
            product_type: "toy",
            seller_id: seeded.seller_id,
            category_id: Some(seeded.category_id),
            created_at: base_time(),
        },
    )
    .await?;
    for (url, sort_order) in [("b.jpg", 2), ("a.jpg", 1), ("c.jpg", 3)] {
        sqlx::query(
            "INSERT INTO product_images (product_id, image_url, sort_order) VALUES ($1, $2, $3)",
        )
        .bind(id)
        .bind(url)
        .bind(sort_order)
        .execute(&pool)
        .await?;
    }
    sqlx::query(r#"INSERT INTO product_options (product_id, optname, "values") VALUES ($1, 'size', $2::JSONB)"#)
        .bind(id)
        .bind(r#"{"sizes": ["S", "M"], "extra": {"price": 1.5}}"#)
        .execute(&pool)
        .await?;

    let detail = product_service::get_product(&state, id)
        .await?
        .data
        .expect("detail");
    let urls: Vec<&str> = detail.images.iter().map(|i| i.image_url.as_str()).collect();
    assert_eq!(urls, vec!["a.jpg", "b.jpg", "c.jpg"]);
    assert_eq!(detail.options.len(), 1);
    assert_eq!(detail.options[0].optname, "size");
    let values: serde_json::Value = serde_json::from_str(detail.options[0].values.get())?;
    assert_eq!(
        values,
        serde_json::json!({ "sizes": ["S", "M"], "extra": { "price": 1.5 } })
    );

    let page = product_service::fetch_product_page(&state, &ProductQueryParams::default()).await?;
    assert_eq!(page.items[0].images.len(), 3);
    assert_eq!(page.items[0].images[0].image_url, "a.jpg");
    assert_eq!(page.items[0].options.len(), 1);

    assert!(matches!(
        product_service::get_product(&state, Uuid::new_v4()).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        shop_service::get_shop(&state, Uuid::new_v4()).await,
        Err(AppError::NotFound)
    ));

    let shop = shop_service::get_shop(&state, seeded.seller_id)
        .await?
        .data
        .expect("shop");
    assert_eq!(shop.name, "Happy Paws");

    let categories = category_service::list_categories(&state)
        .await?
        .data
        .expect("categories");
    assert_eq!(categories.items.len(), 1);
    assert_eq!(categories.items[0].products.len(), 1);
    assert_eq!(categories.items[0].products[0].images.len(), 3);

    let seller_products = product_service::list_seller_products(&state, seeded.seller_id)
        .await?
        .data
        .expect("seller products");
    assert_eq!(seller_products.items.len(), 1);
    Ok(())
}
