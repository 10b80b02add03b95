use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Category, ProductItem, ProductImage, Seller};

/// One page of the product listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub items: Vec<ProductItem>,
    /// Token for the next page; empty when this is the last one.
    pub next_cursor: String,
    pub limit: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<ProductItem>)]
    pub items: Vec<ProductItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryWithProducts {
    pub category: Category,
    pub products: Vec<ProductItem>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CategoryList {
    #[schema(value_type = Vec<CategoryWithProducts>)]
    pub items: Vec<CategoryWithProducts>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ImageList {
    #[schema(value_type = Vec<ProductImage>)]
    pub items: Vec<ProductImage>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ShopList {
    #[schema(value_type = Vec<Seller>)]
    pub items: Vec<Seller>,
}
