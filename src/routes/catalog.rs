use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::products::{CategoryList, ImageList, ShopList},
    error::AppResult,
    models::Seller,
    response::ApiResponse,
    services::{category_service, image_service, shop_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/images", get(list_all_images))
        .route("/shops", get(list_shops))
        .route("/shops/{id}", get(get_shop))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "Categories with their products", body = ApiResponse<CategoryList>)
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = category_service::list_categories(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/images",
    responses(
        (status = 200, description = "All product images", body = ApiResponse<ImageList>)
    ),
    tag = "Images"
)]
pub async fn list_all_images(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ImageList>>> {
    let resp = image_service::list_all_images(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/shops",
    responses(
        (status = 200, description = "All shops", body = ApiResponse<ShopList>)
    ),
    tag = "Shops"
)]
pub async fn list_shops(State(state): State<AppState>) -> AppResult<Json<ApiResponse<ShopList>>> {
    let resp = shop_service::list_shops(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/shops/{id}",
    params(
        ("id" = Uuid, Path, description = "Seller ID")
    ),
    responses(
        (status = 200, description = "Shop detail", body = ApiResponse<Seller>),
        (status = 404, description = "Shop not found"),
    ),
    tag = "Shops"
)]
pub async fn get_shop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Seller>>> {
    let resp = shop_service::get_shop(&state, id).await?;
    Ok(Json(resp))
}
