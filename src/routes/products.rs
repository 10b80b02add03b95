use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::products::{ImageList, ProductList, ProductResponse},
    error::AppResult,
    models::ProductItem,
    query::ProductQueryParams,
    response::ApiResponse,
    routes::params::ProductListQuery,
    services::{image_service, product_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/recommended", get(list_recommended))
        .route("/newest-by-seller", get(list_newest_by_seller))
        .route("/seller/{seller_id}", get(list_seller_products))
        .route("/{id}", get(get_product))
        .route("/{id}/images", get(list_product_images))
}

#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(
        ("cursor" = Option<String>, Query, description = "Opaque token from a previous page"),
        ("limit" = Option<i64>, Query, description = "Page size 1-100, default 20"),
        ("search" = Option<String>, Query, description = "Name substring, whitespace-insensitive"),
        ("category" = Option<i32>, Query, description = "Category ID"),
        ("seller_id" = Option<Uuid>, Query, description = "Seller ID"),
        ("availability" = Option<String>, Query, description = "e.g. active, inactive"),
        ("recommendation" = Option<String>, Query, description = "e.g. recommended, normal"),
        ("product_type" = Option<String>, Query, description = "food, medicine, toy or shelter"),
        ("sort" = Option<String>, Query, description = "name, price or created_at; default price"),
        ("order" = Option<String>, Query, description = "asc or desc; default asc"),
    ),
    responses(
        (status = 200, description = "List products", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Invalid cursor or filter"),
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> AppResult<Json<ApiResponse<ProductResponse>>> {
    let params = ProductQueryParams::try_from(query)?;
    let resp = product_service::list_products(&state, params).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<ProductItem>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ProductItem>>> {
    let resp = product_service::get_product(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/recommended",
    responses(
        (status = 200, description = "Recommended products", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_recommended(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_recommended(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/newest-by-seller",
    responses(
        (status = 200, description = "Newest active product of each seller", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_newest_by_seller(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_newest_by_seller(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/seller/{seller_id}",
    params(
        ("seller_id" = Uuid, Path, description = "Seller ID")
    ),
    responses(
        (status = 200, description = "Products of one seller, newest first", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_seller_products(
    State(state): State<AppState>,
    Path(seller_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_seller_products(&state, seller_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}/images",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Images of a product", body = ApiResponse<ImageList>)
    ),
    tag = "Products"
)]
pub async fn list_product_images(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ImageList>>> {
    let resp = image_service::list_product_images(&state, id).await?;
    Ok(Json(resp))
}
