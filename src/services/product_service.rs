use futures_util::TryStreamExt;
use uuid::Uuid;

use crate::{
    dto::products::{ProductList, ProductResponse},
    error::{AppError, AppResult},
    models::{ProductItem, ProductRow},
    pagination::split_page,
    query::{
        ProductQueryParams, Recommendation,
        composer::{PRODUCT_COLUMNS, PRODUCT_FROM, compose},
    },
    response::{ApiResponse, Meta},
    services::enrichment,
    state::AppState,
};

const RECOMMENDED_LIMIT: i64 = 3;

pub async fn list_products(
    state: &AppState,
    params: ProductQueryParams,
) -> AppResult<ApiResponse<ProductResponse>> {
    let page = fetch_product_page(state, &params).await?;
    let meta = Meta::page(page.items.len(), page.limit, !page.next_cursor.is_empty());
    Ok(ApiResponse::success("Products", page, Some(meta)))
}

/// One page of the listing: at most `limit` enriched items and the token
/// for the following page (empty at the end of the stream).
pub async fn fetch_product_page(
    state: &AppState,
    params: &ProductQueryParams,
) -> AppResult<ProductResponse> {
    let composed = compose(params)?;
    let limit = composed.limit;
    let wanted = (limit + 1) as usize;
    tracing::debug!(
        bound = composed.args.len(),
        limit,
        sort = ?composed.sort,
        "listing products"
    );

    let pool = state.db.pool();
    let mut rows: Vec<ProductRow> = Vec::with_capacity(wanted);
    {
        let mut stream = composed.query_as::<ProductRow>().fetch(&pool);
        while let Some(row) = stream.try_next().await? {
            rows.push(row);
            if rows.len() == wanted {
                break;
            }
        }
    }

    let (rows, next_cursor) = split_page(rows, limit as usize, composed.sort);
    let mut items: Vec<ProductItem> = rows.into_iter().map(ProductRow::into_item).collect();
    enrichment::enrich_all(&state.db, &mut items).await?;

    Ok(ProductResponse {
        items,
        next_cursor,
        limit,
    })
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<ProductItem>> {
    let row = sqlx::query_as::<_, ProductRow>(&format!(
        "SELECT {PRODUCT_COLUMNS} {PRODUCT_FROM} WHERE p.product_id = $1"
    ))
    .bind(id)
    .fetch_optional(&state.db.pool())
    .await?;
    let mut item = match row {
        Some(row) => row.into_item(),
        None => return Err(AppError::NotFound),
    };

    enrichment::enrich(&state.db, &mut item).await?;
    Ok(ApiResponse::success("Product", item, None))
}

pub async fn list_recommended(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let rows = sqlx::query_as::<_, ProductRow>(&format!(
        "SELECT {PRODUCT_COLUMNS} {PRODUCT_FROM} WHERE p.recommendation = $1 \
         ORDER BY p.created_at DESC, p.product_id ASC LIMIT $2"
    ))
    .bind(Recommendation::Recommended.as_str())
    .bind(RECOMMENDED_LIMIT)
    .fetch_all(&state.db.pool())
    .await?;

    product_list(state, rows, "Recommended products").await
}

/// Newest active product of every seller.
pub async fn list_newest_by_seller(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let rows = sqlx::query_as::<_, ProductRow>(&format!(
        "SELECT DISTINCT ON (p.seller_id) {PRODUCT_COLUMNS} {PRODUCT_FROM} \
         WHERE p.availability = $1 ORDER BY p.seller_id, p.created_at DESC, p.product_id ASC"
    ))
    .bind("active")
    .fetch_all(&state.db.pool())
    .await?;

    product_list(state, rows, "Newest products by seller").await
}

pub async fn list_seller_products(
    state: &AppState,
    seller_id: Uuid,
) -> AppResult<ApiResponse<ProductList>> {
    let rows = sqlx::query_as::<_, ProductRow>(&format!(
        "SELECT {PRODUCT_COLUMNS} {PRODUCT_FROM} WHERE p.seller_id = $1 \
         ORDER BY p.created_at DESC, p.product_id ASC"
    ))
    .bind(seller_id)
    .fetch_all(&state.db.pool())
    .await?;

    product_list(state, rows, "Seller products").await
}

pub(crate) async fn load_category_products(
    state: &AppState,
    category_id: i32,
) -> AppResult<Vec<ProductItem>> {
    let rows = sqlx::query_as::<_, ProductRow>(&format!(
        "SELECT {PRODUCT_COLUMNS} {PRODUCT_FROM} WHERE p.category_id = $1 \
         ORDER BY p.created_at DESC, p.product_id ASC"
    ))
    .bind(category_id)
    .fetch_all(&state.db.pool())
    .await?;

    hydrate(state, rows).await
}

async fn product_list(
    state: &AppState,
    rows: Vec<ProductRow>,
    message: &str,
) -> AppResult<ApiResponse<ProductList>> {
    let items = hydrate(state, rows).await?;
    let meta = Meta::count(items.len());
    Ok(ApiResponse::success(message, ProductList { items }, Some(meta)))
}

async fn hydrate(state: &AppState, rows: Vec<ProductRow>) -> AppResult<Vec<ProductItem>> {
    let mut items: Vec<ProductItem> = rows.into_iter().map(ProductRow::into_item).collect();
    enrichment::enrich_all(&state.db, &mut items).await?;
    Ok(items)
}
