use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::catalog::Product;
use super::errors::DomainError;

/// Quantity increment in grams. Product prices are quoted per this amount,
/// so a line contributes `price * quantity / 100` to the total.
pub const QUANTITY_STEP: i32 = 100;

/// One selected product with its quantity in grams.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: i32,
}

impl CartLine {
    /// The amount this line contributes to the cart total.
    pub fn subtotal(&self) -> BigDecimal {
        (&self.product.price * BigDecimal::from(self.quantity)) / BigDecimal::from(QUANTITY_STEP)
    }
}

/// The shopping cart: an insertion-ordered set of lines, one per product id.
///
/// All mutation goes through [`Cart::add`], [`Cart::set_quantity`] and
/// [`Cart::remove`]; a line's quantity is strictly positive for as long as
/// the line exists. Empty is an ordinary state — a new cart starts empty and
/// removing the last line returns to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Add one step (100g) of `product`, merging into an existing line.
    pub fn add(&mut self, product: Product) {
        self.add_quantity(product, QUANTITY_STEP);
    }

    /// Add `quantity` grams of `product`. If the product is already in the
    /// cart its line quantity is incremented; otherwise a new line is
    /// appended. Non-positive quantities are ignored.
    pub fn add_quantity(&mut self, product: Product, quantity: i32) {
        if quantity <= 0 {
            return;
        }
        match self.lines.iter_mut().find(|l| l.product.id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine { product, quantity }),
        }
    }

    /// Set the quantity of an existing line.
    ///
    /// A non-positive quantity is rejected without touching the cart; callers
    /// that step a line down to zero are expected to call [`Cart::remove`]
    /// instead. Setting the quantity of a product that is not in the cart is
    /// a no-op.
    pub fn set_quantity(&mut self, product_id: Uuid, quantity: i32) -> Result<(), DomainError> {
        if quantity <= 0 {
            return Err(DomainError::validation(
                "quantity must be positive; remove the item instead",
            ));
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product_id) {
            line.quantity = quantity;
        }
        Ok(())
    }

    /// Remove the line for `product_id`. Removing an absent id is a no-op.
    pub fn remove(&mut self, product_id: Uuid) {
        self.lines.retain(|l| l.product.id != product_id);
    }

    /// Sum of line subtotals. Unrounded; presentation formats to two
    /// decimal places.
    pub fn total(&self) -> BigDecimal {
        self.lines
            .iter()
            .fold(BigDecimal::from(0), |acc, line| acc + line.subtotal())
    }
}

/// Render a gram quantity the way the storefront shows it: kilograms from
/// 1000g upward ("1 kg", "1.5 kg"), raw grams below that ("300g").
pub fn display_quantity(quantity: i32) -> String {
    if quantity >= 1000 {
        let kilos = quantity / 1000;
        let tenths = (quantity % 1000) / QUANTITY_STEP;
        if tenths == 0 {
            format!("{kilos} kg")
        } else {
            format!("{kilos}.{tenths} kg")
        }
    } else {
        format!("{quantity}g")
    }
}
