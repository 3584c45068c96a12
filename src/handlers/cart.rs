use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::cart::{display_quantity, Cart, QUANTITY_STEP};
use crate::domain::errors::DomainError;
use crate::errors::AppError;
use crate::AppState;

use super::{authenticated_user, money};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddCartItemRequest {
    pub product_id: Uuid,
    /// Grams to add. Defaults to one 100g step.
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    QUANTITY_STEP
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    /// New line quantity in grams; must be positive. Use DELETE to drop
    /// the line.
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartLineResponse {
    pub product_id: Uuid,
    pub name: String,
    /// Price per 100g, as a decimal string.
    pub price: String,
    pub image: String,
    pub quantity: i32,
    /// Human-readable quantity ("300g", "1.5 kg").
    pub display_quantity: String,
    pub subtotal: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartResponse {
    pub items: Vec<CartLineResponse>,
    pub total: String,
}

fn cart_response(cart: &Cart) -> CartResponse {
    CartResponse {
        items: cart
            .lines()
            .iter()
            .map(|line| CartLineResponse {
                product_id: line.product.id,
                name: line.product.name.clone(),
                price: money(&line.product.price),
                image: line.product.image.clone(),
                quantity: line.quantity,
                display_quantity: display_quantity(line.quantity),
                subtotal: money(&line.subtotal()),
            })
            .collect(),
        total: money(&cart.total()),
    }
}

/// GET /cart
#[utoipa::path(
    get,
    path = "/cart",
    responses(
        (status = 200, description = "The current user's cart", body = CartResponse),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    tag = "cart"
)]
pub async fn get_cart(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req, &state.tokens)?;
    Ok(HttpResponse::Ok().json(cart_response(&state.carts.view(user_id))))
}

/// POST /cart/items
///
/// Adds a product from the current catalog snapshot; adding a product
/// already in the cart increases its line quantity.
#[utoipa::path(
    post,
    path = "/cart/items",
    request_body = AddCartItemRequest,
    responses(
        (status = 200, description = "Updated cart", body = CartResponse),
        (status = 400, description = "Non-positive quantity"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Product not in the catalog"),
    ),
    tag = "cart"
)]
pub async fn add_item(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<AddCartItemRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req, &state.tokens)?;
    let body = body.into_inner();

    if body.quantity <= 0 {
        return Err(DomainError::validation("Quantity must be positive").into());
    }

    let snapshot = state.feed.current();
    let product = snapshot
        .product(body.product_id)
        .cloned()
        .ok_or(DomainError::NotFound)?;

    let cart = state.carts.with_cart(user_id, |cart| {
        cart.add_quantity(product, body.quantity);
        cart.clone()
    });
    Ok(HttpResponse::Ok().json(cart_response(&cart)))
}

/// PUT /cart/items/{product_id}
///
/// Sets a line's quantity. Stepping a line down to zero must go through
/// DELETE instead; a non-positive quantity here is rejected.
#[utoipa::path(
    put,
    path = "/cart/items/{product_id}",
    params(
        ("product_id" = Uuid, Path, description = "Product UUID"),
    ),
    request_body = UpdateQuantityRequest,
    responses(
        (status = 200, description = "Updated cart", body = CartResponse),
        (status = 400, description = "Non-positive quantity"),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    tag = "cart"
)]
pub async fn set_quantity(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateQuantityRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req, &state.tokens)?;
    let product_id = path.into_inner();

    let cart = state
        .carts
        .with_cart(user_id, |cart| {
            cart.set_quantity(product_id, body.quantity)?;
            Ok::<_, DomainError>(cart.clone())
        })?;
    Ok(HttpResponse::Ok().json(cart_response(&cart)))
}

/// DELETE /cart/items/{product_id}
#[utoipa::path(
    delete,
    path = "/cart/items/{product_id}",
    params(
        ("product_id" = Uuid, Path, description = "Product UUID"),
    ),
    responses(
        (status = 200, description = "Updated cart", body = CartResponse),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    tag = "cart"
)]
pub async fn remove_item(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let user_id = authenticated_user(&req, &state.tokens)?;
    let product_id = path.into_inner();

    let cart = state.carts.with_cart(user_id, |cart| {
        cart.remove(product_id);
        cart.clone()
    });
    Ok(HttpResponse::Ok().json(cart_response(&cart)))
}
