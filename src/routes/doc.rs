use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::products::{CategoryList, CategoryWithProducts, ImageList, ProductList, ProductResponse, ShopList},
    models::{Category, Inventory, Product, ProductImage, ProductItem, ProductOption, Seller},
    query::{ProductSort, ProductType, SortOrder},
    response::{ApiResponse, Meta},
    routes::{catalog, health, params, products},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::get_product,
        products::list_recommended,
        products::list_newest_by_seller,
        products::list_seller_products,
        products::list_product_images,
        catalog::list_categories,
        catalog::list_all_images,
        catalog::list_shops,
        catalog::get_shop
    ),
    components(
        schemas(
            Product,
            ProductItem,
            Category,
            Inventory,
            ProductImage,
            ProductOption,
            Seller,
            ProductSort,
            ProductType,
            SortOrder,
            params::ProductListQuery,
            health::HealthData,
            ProductResponse,
            ProductList,
            CategoryWithProducts,
            CategoryList,
            ImageList,
            ShopList,
            Meta,
            ApiResponse<ProductResponse>,
            ApiResponse<ProductItem>,
            ApiResponse<ProductList>,
            ApiResponse<CategoryList>,
            ApiResponse<ImageList>,
            ApiResponse<ShopList>,
            ApiResponse<Seller>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product listing and detail endpoints"),
        (name = "Categories", description = "Category endpoints"),
        (name = "Images", description = "Product image endpoints"),
        (name = "Shops", description = "Seller endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
