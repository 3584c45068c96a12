use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::cart::{Cart, CartLine};

/// Delivery contact for an order, prefilled from the profile and editable
/// at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct BuyerContact {
    pub name: String,
    pub address: String,
    pub phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    CashOnDelivery,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "CASH",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_uppercase().as_str() {
            "CASH" | "CASH_ON_DELIVERY" => Some(PaymentMethod::CashOnDelivery),
            _ => None,
        }
    }
}

/// Checkout-time snapshot of a cart.
///
/// The lines are deep copies and the total is computed once, at
/// construction; the live cart is never touched. An abandoned draft needs
/// no rollback.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub buyer: BuyerContact,
    pub payment_method: PaymentMethod,
    pub lines: Vec<CartLine>,
    pub total: BigDecimal,
}

impl OrderDraft {
    pub fn begin(cart: &Cart, buyer: BuyerContact, payment_method: PaymentMethod) -> Self {
        OrderDraft {
            buyer,
            payment_method,
            lines: cart.lines().to_vec(),
            total: cart.total(),
        }
    }
}

/// A stored order line, as read back from the order history.
#[derive(Debug, Clone)]
pub struct OrderLineView {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub unit_price: BigDecimal,
    pub quantity: i32,
}

/// A stored order, as read back from the order history.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub buyer: BuyerContact,
    pub payment_method: String,
    pub total_amount: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<OrderLineView>,
}

#[derive(Debug, Clone)]
pub struct ListResult {
    pub items: Vec<OrderView>,
    pub total: i64,
}
