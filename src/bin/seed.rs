use catalog_query_api::{
    config::AppConfig,
    db::{Database, run_migrations},
};
use uuid::Uuid;

const SELLERS: [(&str, &str); 2] = [
    ("Happy Paws", "happypaws@example.com"),
    ("Pet Corner", "petcorner@example.com"),
];

const CATEGORIES: [&str; 4] = ["Food", "Medicine", "Toys", "Shelters"];

// (name, brand, price, product_type, category index, recommendation)
const PRODUCTS: [(&str, &str, f64, &str, usize, &str); 8] = [
    ("Salmon Kibble", "NutriPet", 24.50, "food", 0, "recommended"),
    ("Chicken Treats", "NutriPet", 6.99, "food", 0, "normal"),
    ("Flea Drops", "VetCare", 18.00, "medicine", 1, "normal"),
    ("Joint Supplement", "VetCare", 32.75, "medicine", 1, "recommended"),
    ("Red Squeaky Ball", "PlayTime", 4.25, "toy", 2, "normal"),
    ("Rope Tug", "PlayTime", 7.80, "toy", 2, "recommended"),
    ("Cozy Cat Cave", "NestWell", 45.00, "shelter", 3, "normal"),
    ("Outdoor Dog House", "NestWell", 129.99, "shelter", 3, "normal"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let db = Database::connect(&config.database_url, config.pool.clone()).await?;
    run_migrations(&db.orm()).await?;
    let pool = db.pool();

    let mut seller_ids = Vec::new();
    for (name, email) in SELLERS {
        seller_ids.push(ensure_seller(&pool, name, email).await?);
    }

    let mut category_ids = Vec::new();
    for name in CATEGORIES {
        category_ids.push(ensure_category(&pool, name).await?);
    }

    let mut created = 0;
    for (index, (name, brand, price, product_type, category, recommendation)) in
        PRODUCTS.into_iter().enumerate()
    {
        let seller_id = seller_ids[index % seller_ids.len()];
        if seed_product(
            &pool,
            seller_id,
            category_ids[category],
            name,
            brand,
            price,
            product_type,
            recommendation,
        )
        .await?
        {
            created += 1;
        }
    }

    println!("Seed completed. {created} new products");
    Ok(())
}

async fn ensure_seller(pool: &sqlx::PgPool, name: &str, email: &str) -> anyhow::Result<Uuid> {
    let existing: Option<(Uuid,)> =
        sqlx::query_as("SELECT seller_id FROM sellers WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO sellers (seller_id, name, email) VALUES ($1, $2, $3) RETURNING seller_id",
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn ensure_category(pool: &sqlx::PgPool, name: &str) -> anyhow::Result<i32> {
    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO categories (name) VALUES ($1)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING category_id
        "#,
    )
    .bind(name)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

#[allow(clippy::too_many_arguments)]
async fn seed_product(
    pool: &sqlx::PgPool,
    seller_id: Uuid,
    category_id: i32,
    name: &str,
    brand: &str,
    price: f64,
    product_type: &str,
    recommendation: &str,
) -> anyhow::Result<bool> {
    let exists: Option<(Uuid,)> =
        sqlx::query_as("SELECT product_id FROM products WHERE name = $1 AND seller_id = $2")
            .bind(name)
            .bind(seller_id)
            .fetch_optional(pool)
            .await?;
    if exists.is_some() {
        return Ok(false);
    }

    let mut tx = pool.begin().await?;
    let product_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO products
            (product_id, name, description, brand, sku, price, recommendation, seller_id, product_type, category_id)
        VALUES ($1, $2, $3, $4, $5, $6::NUMERIC, $7, $8, $9, $10)
        "#,
    )
    .bind(product_id)
    .bind(name)
    .bind(format!("{name} by {brand}"))
    .bind(brand)
    .bind(format!("SKU-{}", &product_id.simple().to_string()[..8]))
    .bind(price.to_string())
    .bind(recommendation)
    .bind(seller_id)
    .bind(product_type)
    .bind(category_id)
    .execute(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO inventory (product_id, quantity) VALUES ($1, $2)")
        .bind(product_id)
        .bind(25_i32)
        .execute(&mut *tx)
        .await?;

    let type_table = match product_type {
        "food" => "foods",
        "medicine" => "medicines",
        "toy" => "toys",
        _ => "shelters",
    };
    sqlx::query(&format!(
        "INSERT INTO {type_table} (product_id, name, description, brand, price) \
         SELECT product_id, name, description, brand, price FROM products WHERE product_id = $1"
    ))
    .bind(product_id)
    .execute(&mut *tx)
    .await?;

    for (sort_order, suffix) in ["front", "side"].into_iter().enumerate() {
        sqlx::query(
            "INSERT INTO product_images (product_id, image_url, is_primary, alt_text, sort_order) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(product_id)
        .bind(format!("https://img.example.com/{product_id}/{suffix}.jpg"))
        .bind(sort_order == 0)
        .bind(format!("{name} ({suffix})"))
        .bind(sort_order as i32)
        .execute(&mut *tx)
        .await?;
    }

    sqlx::query(r#"INSERT INTO product_options (product_id, optname, "values") VALUES ($1, $2, $3::JSONB)"#)
        .bind(product_id)
        .bind("size")
        .bind(r#"["small", "medium", "large"]"#)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(true)
}
