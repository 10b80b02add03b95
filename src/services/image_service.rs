use sea_orm::{EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::{
    dto::products::ImageList,
    entity::product_images::{Column, Entity as ProductImages},
    error::AppResult,
    response::{ApiResponse, Meta},
    services::enrichment::{image_from_entity, load_images},
    state::AppState,
};

pub async fn list_product_images(
    state: &AppState,
    product_id: Uuid,
) -> AppResult<ApiResponse<ImageList>> {
    let items = load_images(&state.db.orm(), product_id).await?;
    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Product images", ImageList { items }, Some(meta)))
}

pub async fn list_all_images(state: &AppState) -> AppResult<ApiResponse<ImageList>> {
    let items: Vec<_> = ProductImages::find()
        .order_by_asc(Column::ProductId)
        .order_by_asc(Column::SortOrder)
        .order_by_asc(Column::ImageId)
        .all(&state.db.orm())
        .await?
        .into_iter()
        .map(image_from_entity)
        .collect();

    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Images", ImageList { items }, Some(meta)))
}
