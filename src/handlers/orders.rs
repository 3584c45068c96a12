use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::cart::display_quantity;
use crate::domain::order::OrderView;
use crate::errors::AppError;
use crate::AppState;

use super::{authenticated_user, money, ListParams};

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderLineResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    /// Price per 100g at the time of the order, as a decimal string.
    pub unit_price: String,
    pub quantity: i32,
    pub display_quantity: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub payment_method: String,
    pub total_amount: String,
    pub created_at: String,
    pub lines: Vec<OrderLineResponse>,
}

impl From<OrderView> for OrderResponse {
    fn from(o: OrderView) -> Self {
        OrderResponse {
            id: o.id,
            name: o.buyer.name,
            address: o.buyer.address,
            phone: o.buyer.phone,
            payment_method: o.payment_method,
            total_amount: money(&o.total_amount),
            created_at: o.created_at.to_rfc3339(),
            lines: o
                .lines
                .into_iter()
                .map(|l| OrderLineResponse {
                    id: l.id,
                    product_id: l.product_id,
                    name: l.name,
                    unit_price: money(&l.unit_price),
                    quantity: l.quantity,
                    display_quantity: display_quantity(l.quantity),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListOrdersResponse {
    pub items: Vec<OrderResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// GET /orders
///
/// The current user's order history, newest first, without lines.
#[utoipa::path(
    get,
    path = "/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
    ),
    responses(
        (status = 200, description = "Paginated order history", body = ListOrdersResponse),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req, &state.tokens)?;
    let (page, limit) = query.clamped();

    let st = state.clone();
    let result = web::block(move || st.orders.list_orders(user_id, page, limit))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ListOrdersResponse {
        items: result.items.into_iter().map(OrderResponse::from).collect(),
        total: result.total,
        page,
        limit,
    }))
}

/// GET /orders/{id}
///
/// One of the current user's orders, with its lines. Other users' orders
/// are indistinguishable from missing ones.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "No such order for this user"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req, &state.tokens)?;
    let order_id = path.into_inner();

    let st = state.clone();
    let order = web::block(move || st.orders.get_order(user_id, order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}
