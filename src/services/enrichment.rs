use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde_json::value::RawValue;
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    db::{Database, DbPool, OrmConn},
    entity::product_images::{Column as ImageCol, Entity as ProductImages, Model as ImageModel},
    error::AppResult,
    models::{ProductImage, ProductItem, ProductOption},
};

#[derive(Debug, FromRow)]
struct OptionRow {
    option_id: Uuid,
    product_id: Uuid,
    optname: String,
    option_values: String,
}

const OPTION_COLUMNS: &str =
    r#"option_id, product_id, optname, "values"::TEXT AS option_values"#;

/// Images of one product in display order.
pub async fn load_images(orm: &OrmConn, product_id: Uuid) -> AppResult<Vec<ProductImage>> {
    let images = ProductImages::find()
        .filter(ImageCol::ProductId.eq(product_id))
        .order_by_asc(ImageCol::SortOrder)
        .order_by_asc(ImageCol::ImageId)
        .all(orm)
        .await?
        .into_iter()
        .map(image_from_entity)
        .collect();
    Ok(images)
}

pub async fn load_options(pool: &DbPool, product_id: Uuid) -> AppResult<Vec<ProductOption>> {
    let rows = sqlx::query_as::<_, OptionRow>(&format!(
        "SELECT {OPTION_COLUMNS} FROM product_options WHERE product_id = $1 ORDER BY optname, option_id"
    ))
    .bind(product_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(option_from_row).collect()
}

/// Attach images and options to a single product.
pub async fn enrich(db: &Database, item: &mut ProductItem) -> AppResult<()> {
    let id = item.product.id;
    item.images = load_images(&db.orm(), id).await?;
    item.options = load_options(&db.pool(), id).await?;
    Ok(())
}

/// Attach images and options to a whole page with one query per collection.
/// Any failure aborts the page.
pub async fn enrich_all(db: &Database, items: &mut [ProductItem]) -> AppResult<()> {
    if items.is_empty() {
        return Ok(());
    }
    let ids: Vec<Uuid> = items.iter().map(|item| item.product.id).collect();

    let mut images: HashMap<Uuid, Vec<ProductImage>> = HashMap::new();
    let image_models = ProductImages::find()
        .filter(ImageCol::ProductId.is_in(ids.iter().copied()))
        .order_by_asc(ImageCol::ProductId)
        .order_by_asc(ImageCol::SortOrder)
        .order_by_asc(ImageCol::ImageId)
        .all(&db.orm())
        .await?;
    for model in image_models {
        let image = image_from_entity(model);
        images.entry(image.product_id).or_default().push(image);
    }

    let mut options: HashMap<Uuid, Vec<ProductOption>> = HashMap::new();
    let option_rows = sqlx::query_as::<_, OptionRow>(&format!(
        "SELECT {OPTION_COLUMNS} FROM product_options WHERE product_id = ANY($1) \
         ORDER BY product_id, optname, option_id"
    ))
    .bind(&ids)
    .fetch_all(&db.pool())
    .await?;
    for row in option_rows {
        let product_id = row.product_id;
        options
            .entry(product_id)
            .or_default()
            .push(option_from_row(row)?);
    }

    for item in items.iter_mut() {
        item.images = images.remove(&item.product.id).unwrap_or_default();
        item.options = options.remove(&item.product.id).unwrap_or_default();
    }
    Ok(())
}

pub(crate) fn image_from_entity(model: ImageModel) -> ProductImage {
    ProductImage {
        id: model.image_id,
        product_id: model.product_id,
        image_url: model.image_url,
        is_primary: model.is_primary,
        alt_text: model.alt_text,
        sort_order: model.sort_order,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn option_from_row(row: OptionRow) -> AppResult<ProductOption> {
    let values = RawValue::from_string(row.option_values).map_err(anyhow::Error::from)?;
    Ok(ProductOption {
        id: row.option_id,
        optname: row.optname,
        values,
    })
}
