use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    Name,
    #[default]
    Price,
    CreatedAt,
}

impl ProductSort {
    /// Unknown or missing values sort by price.
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("name") => ProductSort::Name,
            Some("price") => ProductSort::Price,
            Some("created_at") => ProductSort::CreatedAt,
            _ => ProductSort::Price,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            ProductSort::Name => "p.name",
            ProductSort::Price => "p.price",
            ProductSort::CreatedAt => "p.created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Case-insensitive; anything unrecognised is ascending.
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Active,
    Inactive,
    Other(String),
}

impl Availability {
    pub fn as_str(&self) -> &str {
        match self {
            Availability::Active => "active",
            Availability::Inactive => "inactive",
            Availability::Other(value) => value,
        }
    }
}

impl From<&str> for Availability {
    fn from(value: &str) -> Self {
        match value {
            "active" => Availability::Active,
            "inactive" => Availability::Inactive,
            other => Availability::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation {
    Recommended,
    Normal,
    Other(String),
}

impl Recommendation {
    pub fn as_str(&self) -> &str {
        match self {
            Recommendation::Recommended => "recommended",
            Recommendation::Normal => "normal",
            Recommendation::Other(value) => value,
        }
    }
}

impl From<&str> for Recommendation {
    fn from(value: &str) -> Self {
        match value {
            "recommended" => Recommendation::Recommended,
            "normal" => Recommendation::Normal,
            other => Recommendation::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    Food,
    Medicine,
    Toy,
    Shelter,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Food => "food",
            ProductType::Medicine => "medicine",
            ProductType::Toy => "toy",
            ProductType::Shelter => "shelter",
        }
    }
}

impl std::str::FromStr for ProductType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "food" => Ok(ProductType::Food),
            "medicine" => Ok(ProductType::Medicine),
            "toy" => Ok(ProductType::Toy),
            "shelter" => Ok(ProductType::Shelter),
            other => Err(AppError::InvalidFilter(format!(
                "unknown product type '{other}'"
            ))),
        }
    }
}

/// Validated listing criteria.
#[derive(Debug, Clone, Default)]
pub struct ProductQueryParams {
    pub cursor: Option<String>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub category_id: Option<i32>,
    pub seller_id: Option<Uuid>,
    pub availability: Option<Availability>,
    pub recommendation: Option<Recommendation>,
    pub product_type: Option<ProductType>,
    pub sort: ProductSort,
    pub order: SortOrder,
}

impl ProductQueryParams {
    /// Missing, zero and negative limits use the default; large ones are capped.
    pub fn effective_limit(&self) -> i64 {
        match self.limit {
            Some(limit) if limit > MAX_LIMIT => MAX_LIMIT,
            Some(limit) if limit >= 1 => limit,
            _ => DEFAULT_LIMIT,
        }
    }
}

/// Parse a category id given as text. Blank means "no filter".
pub fn parse_category_id(raw: Option<&str>) -> Result<Option<i32>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(text) => text
            .parse::<i32>()
            .map(Some)
            .map_err(|_| AppError::InvalidFilter("Invalid category ID".into())),
    }
}
