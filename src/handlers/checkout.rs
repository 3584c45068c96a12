use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::checkout::CheckoutRequest;
use crate::domain::errors::DomainError;
use crate::domain::order::PaymentMethod;
use crate::errors::AppError;
use crate::AppState;

use super::{authenticated_user, money};

#[derive(Debug, Deserialize, ToSchema)]
pub struct PlaceOrderRequest {
    /// Delivery contact overrides; omitted fields fall back to the profile.
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    /// Payment method; only "CASH" is supported. Defaults to CASH.
    pub payment_method: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlaceOrderResponse {
    pub id: Uuid,
    pub total: String,
}

/// POST /checkout
///
/// Snapshots the cart and submits the order. The order history append and
/// the payment record are committed atomically; on failure nothing is
/// written and the cart is left as-is for a retry.
#[utoipa::path(
    post,
    path = "/checkout",
    request_body = PlaceOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = PlaceOrderResponse),
        (status = 400, description = "Empty cart or missing delivery details"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 503, description = "Order could not be written; retry"),
    ),
    tag = "checkout"
)]
pub async fn place_order(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<PlaceOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req, &state.tokens)?;
    let body = body.into_inner();

    let payment_method = match body.payment_method.as_deref() {
        None => PaymentMethod::default(),
        Some(raw) => PaymentMethod::parse(raw).ok_or_else(|| {
            DomainError::validation(format!("Unsupported payment method: {raw}"))
        })?,
    };

    let request = CheckoutRequest {
        name: body.name,
        address: body.address,
        phone: body.phone,
        payment_method,
    };
    let cart = state.carts.view(user_id);

    let st = state.clone();
    let placed = web::block(move || st.checkout.place_order(Some(user_id), &cart, request))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(PlaceOrderResponse {
        id: placed.order_id,
        total: money(&placed.total),
    }))
}
