use chrono::Utc;
use sea_orm::{EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::{
    dto::products::ShopList,
    entity::sellers::{Column, Entity as Sellers, Model as SellerModel},
    error::{AppError, AppResult},
    models::Seller,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_shops(state: &AppState) -> AppResult<ApiResponse<ShopList>> {
    let items: Vec<Seller> = Sellers::find()
        .order_by_asc(Column::Name)
        .order_by_asc(Column::SellerId)
        .all(&state.db.orm())
        .await?
        .into_iter()
        .map(seller_from_entity)
        .collect();

    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Shops", ShopList { items }, Some(meta)))
}

pub async fn get_shop(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Seller>> {
    let result = Sellers::find_by_id(id)
        .one(&state.db.orm())
        .await?
        .map(seller_from_entity);
    let result = match result {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Shop", result, None))
}

fn seller_from_entity(model: SellerModel) -> Seller {
    Seller {
        seller_id: model.seller_id,
        name: model.name,
        logo: model.logo,
        description: model.description,
        address: model.address,
        phone: model.phone,
        email: model.email,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
