use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::catalog::Product;
use crate::errors::AppError;
use crate::AppState;

use super::{default_limit, default_page, money};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CatalogQuery {
    /// Optional case-insensitive name filter.
    pub q: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    /// Price per 100g, as a decimal string.
    pub price: String,
    pub image: String,
    pub description: Option<String>,
}

impl From<&Product> for ProductResponse {
    fn from(p: &Product) -> Self {
        ProductResponse {
            id: p.id,
            name: p.name.clone(),
            price: money(&p.price),
            image: p.image.clone(),
            description: p.description.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    pub items: Vec<ProductResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdvertisementResponse {
    pub id: Uuid,
    pub image: String,
}

/// GET /catalog
///
/// Serves the latest published catalog snapshot; the database is never hit
/// on this path.
#[utoipa::path(
    get,
    path = "/catalog",
    params(
        ("q" = Option<String>, Query, description = "Case-insensitive name filter"),
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
    ),
    responses(
        (status = 200, description = "Paginated products", body = ProductListResponse),
    ),
    tag = "catalog"
)]
pub async fn list_products(
    state: web::Data<AppState>,
    query: web::Query<CatalogQuery>,
) -> Result<HttpResponse, AppError> {
    let page = query.page.max(1);
    let limit = query.limit.clamp(1, 100);
    let offset = (page - 1) * limit;

    let snapshot = state.feed.current();
    let matches = snapshot.search(query.q.as_deref().unwrap_or(""));
    let total = matches.len() as i64;

    let items: Vec<ProductResponse> = matches
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .map(ProductResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(ProductListResponse {
        items,
        total,
        page,
        limit,
    }))
}

/// GET /catalog/advertisements
#[utoipa::path(
    get,
    path = "/catalog/advertisements",
    responses(
        (status = 200, description = "Advertisement banners", body = [AdvertisementResponse]),
    ),
    tag = "catalog"
)]
pub async fn list_advertisements(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let snapshot = state.feed.current();
    let ads: Vec<AdvertisementResponse> = snapshot
        .advertisements
        .iter()
        .map(|a| AdvertisementResponse {
            id: a.id,
            image: a.image.clone(),
        })
        .collect();
    Ok(HttpResponse::Ok().json(ads))
}
