use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppError,
    query::{ProductQueryParams, ProductSort, ProductType, SortOrder, params::parse_category_id},
};

/// Raw listing query string. Everything arrives as text and is validated
/// by the `TryFrom` conversion below.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductListQuery {
    pub cursor: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub seller_id: Option<String>,
    pub availability: Option<String>,
    pub recommendation: Option<String>,
    pub product_type: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TryFrom<ProductListQuery> for ProductQueryParams {
    type Error = AppError;

    fn try_from(query: ProductListQuery) -> Result<Self, Self::Error> {
        let limit = match non_empty(query.limit) {
            Some(text) => Some(
                text.parse::<i64>()
                    .map_err(|_| AppError::InvalidFilter("Invalid limit value".into()))?,
            ),
            None => None,
        };

        let category_id = parse_category_id(query.category.as_deref())?;

        let seller_id = match non_empty(query.seller_id) {
            Some(text) => Some(
                Uuid::parse_str(&text)
                    .map_err(|_| AppError::InvalidFilter("Invalid seller ID".into()))?,
            ),
            None => None,
        };

        let product_type = match non_empty(query.product_type) {
            Some(text) => Some(text.parse::<ProductType>()?),
            None => None,
        };

        Ok(ProductQueryParams {
            cursor: non_empty(query.cursor),
            limit,
            search: query.search.filter(|s| !s.trim().is_empty()),
            category_id,
            seller_id,
            availability: non_empty(query.availability).map(|v| v.as_str().into()),
            recommendation: non_empty(query.recommendation).map(|v| v.as_str().into()),
            product_type,
            sort: ProductSort::from_param(query.sort.as_deref()),
            order: SortOrder::from_param(query.order.as_deref()),
        })
    }
}
