use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::domain::cart::Cart;
use crate::domain::errors::DomainError;
use crate::domain::order::{BuyerContact, OrderDraft, PaymentMethod};
use crate::domain::ports::{OrderSink, UserRepository};

/// Checkout-time input: contact overrides (falling back to the stored
/// profile) and the chosen payment method.
#[derive(Debug, Clone, Default)]
pub struct CheckoutRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order_id: Uuid,
    pub total: BigDecimal,
}

/// Validates a checkout and hands the resulting order draft to the sink.
///
/// The cart is read, never written: a failed submission leaves it intact
/// for a retry, and a successful one leaves it to expire with the session.
pub struct CheckoutService<S, U> {
    sink: S,
    users: U,
}

impl<S: OrderSink, U: UserRepository> CheckoutService<S, U> {
    pub fn new(sink: S, users: U) -> Self {
        Self { sink, users }
    }

    pub fn place_order(
        &self,
        user_id: Option<Uuid>,
        cart: &Cart,
        request: CheckoutRequest,
    ) -> Result<PlacedOrder, DomainError> {
        let user_id = user_id.ok_or(DomainError::AuthRequired)?;
        if cart.is_empty() {
            return Err(DomainError::validation("Your cart is empty"));
        }

        let profile = self
            .users
            .find_by_id(user_id)?
            .ok_or(DomainError::AuthRequired)?;

        let buyer = BuyerContact {
            name: override_or(request.name, profile.name),
            address: override_or(request.address, profile.address),
            phone: override_or(request.phone, profile.phone),
        };
        if buyer.name.is_empty() || buyer.address.is_empty() || buyer.phone.is_empty() {
            return Err(DomainError::validation(
                "Delivery name, address and phone are required",
            ));
        }

        let draft = OrderDraft::begin(cart, buyer, request.payment_method);
        let order_id = self.sink.submit(user_id, &draft)?;
        log::info!(
            "order {} placed by {} for {} ({} lines)",
            order_id,
            user_id,
            draft.total,
            draft.lines.len()
        );
        Ok(PlacedOrder {
            order_id,
            total: draft.total,
        })
    }
}

fn override_or(value: Option<String>, fallback: String) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback,
    }
}
