use sea_orm::{EntityTrait, QueryOrder};

use crate::{
    dto::products::{CategoryList, CategoryWithProducts},
    entity::categories::{Column, Entity as Categories, Model as CategoryModel},
    error::AppResult,
    models::Category,
    response::{ApiResponse, Meta},
    services::product_service::load_category_products,
    state::AppState,
};

/// Every category with its products, one product query per category.
pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let categories: Vec<Category> = Categories::find()
        .order_by_asc(Column::CategoryId)
        .all(&state.db.orm())
        .await?
        .into_iter()
        .map(category_from_entity)
        .collect();

    let mut items = Vec::with_capacity(categories.len());
    for category in categories {
        let products = load_category_products(state, category.id).await?;
        items.push(CategoryWithProducts { category, products });
    }

    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Categories", CategoryList { items }, Some(meta)))
}

fn category_from_entity(model: CategoryModel) -> Category {
    Category {
        id: model.category_id,
        name: model.name,
    }
}
