use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{cursor::{Cursor, SortKey}, pagination::Keyset, query::ProductSort};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub brand: String,
    pub model_number: String,
    pub sku: String,
    pub price: f64,
    pub availability: String,
    pub recommendation: String,
    pub seller_id: Uuid,
    pub product_type: String,
    pub category_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    #[serde(rename = "category_id")]
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Inventory {
    pub quantity: i32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductImage {
    pub id: Uuid,
    pub product_id: Uuid,
    pub image_url: String,
    pub is_primary: bool,
    pub alt_text: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

/// A named option whose `values` are kept exactly as stored.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductOption {
    pub id: Uuid,
    pub optname: String,
    #[schema(value_type = Object)]
    pub values: Box<RawValue>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductItem {
    #[serde(flatten)]
    pub product: Product,
    pub categories: Vec<Category>,
    pub inventory: Option<Inventory>,
    pub images: Vec<ProductImage>,
    pub options: Vec<ProductOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Seller {
    pub seller_id: Uuid,
    pub name: String,
    pub logo: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row of the product query: the product plus its denormalized
/// category and inventory columns.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub product_id: Uuid,
    pub name: String,
    pub description: String,
    pub brand: String,
    pub model_number: String,
    pub sku: String,
    pub price: f64,
    pub availability: String,
    pub recommendation: String,
    pub seller_id: Uuid,
    pub product_type: String,
    pub category_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category_name: Option<String>,
    pub quantity: Option<i32>,
    pub inventory_updated_at: Option<DateTime<Utc>>,
}

impl ProductRow {
    pub fn into_item(self) -> ProductItem {
        let categories = match (self.category_id, self.category_name) {
            (Some(id), Some(name)) => vec![Category { id, name }],
            _ => Vec::new(),
        };
        let inventory = match (self.quantity, self.inventory_updated_at) {
            (Some(quantity), Some(updated_at)) => Some(Inventory {
                quantity,
                updated_at,
            }),
            _ => None,
        };

        ProductItem {
            product: Product {
                id: self.product_id,
                name: self.name,
                description: self.description,
                brand: self.brand,
                model_number: self.model_number,
                sku: self.sku,
                price: self.price,
                availability: self.availability,
                recommendation: self.recommendation,
                seller_id: self.seller_id,
                product_type: self.product_type,
                category_id: self.category_id,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            categories,
            inventory,
            images: Vec::new(),
            options: Vec::new(),
        }
    }
}

impl Keyset for ProductRow {
    fn keyset(&self, sort: ProductSort) -> Cursor {
        let sort_key = match sort {
            ProductSort::CreatedAt => None,
            ProductSort::Name => Some(SortKey::Name(self.name.clone())),
            ProductSort::Price => Some(SortKey::Price(self.price)),
        };
        Cursor {
            created_at: self.created_at,
            product_id: self.product_id,
            sort_key,
        }
    }
}
