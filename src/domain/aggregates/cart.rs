//! Shopping cart engine

use crate::domain::aggregates::product::Product;
use crate::domain::value_objects::{Money, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Flat shipping charged while the cart has any line, in cents.
pub const SHIPPING_FLAT_CENTS: i64 = 599;

/// Sales tax rate applied to the subtotal (8%).
pub fn tax_rate() -> Decimal {
    Decimal::new(8, 2)
}

/// In-memory cart: product-keyed lines in insertion order, with totals
/// derived on demand. Ephemeral; nothing here is persisted.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

/// One product-and-quantity pair. Quantity is never below 1; removing the
/// last unit removes the line instead.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Money {
        self.product.price * self.quantity
    }
}

/// Totals derived from the current lines.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CartTotals {
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("quantity must be at least 1")]
    InvalidQuantity,
    #[error("no cart line for product")]
    LineNotFound,
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

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Adds one unit of `product`: increments an existing line or inserts a
    /// new line with quantity 1.
    pub fn add_item(&mut self, product: &Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                product: product.clone(),
                quantity: 1,
            });
        }
    }

    /// Deletes the line for `product_id` if present; no-op otherwise.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.lines.retain(|l| &l.product.id != product_id);
    }

    /// Sets a line's quantity exactly. Quantities below 1 are rejected and
    /// leave the line unchanged; callers use [`Cart::remove_item`] instead.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) -> Result<(), CartError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity);
        }
        let line = self
            .lines
            .iter_mut()
            .find(|l| &l.product.id == product_id)
            .ok_or(CartError::LineNotFound)?;
        line.quantity = quantity;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Pure derivation over the current lines:
    /// `subtotal = Σ price×quantity`, flat shipping while non-empty,
    /// `tax = subtotal × 8%`, `total = subtotal + shipping + tax`.
    pub fn totals(&self) -> CartTotals {
        let subtotal = self
            .lines
            .iter()
            .fold(Money::ZERO, |acc, l| acc + l.line_total());
        let shipping = if self.lines.is_empty() {
            Money::ZERO
        } else {
            Money::from_cents(SHIPPING_FLAT_CENTS)
        };
        let tax = subtotal * tax_rate();
        CartTotals {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::product::tests::sample;

    #[test]
    fn test_add_increments_existing_line() {
        let mut cart = Cart::new();
        let journal = sample("P001", 2499);
        cart.add_item(&journal);
        cart.add_item(&journal);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_subtotal_invariant_after_mutations() {
        let mut cart = Cart::new();
        let a = sample("P001", 2499);
        let b = sample("P002", 8999);
        cart.add_item(&a);
        cart.add_item(&b);
        cart.add_item(&a);
        cart.update_quantity(&b.id, 3).unwrap();
        cart.remove_item(&a.id);

        let expected = cart
            .lines()
            .iter()
            .fold(Money::ZERO, |acc, l| acc + l.product.price * l.quantity);
        assert_eq!(cart.totals().subtotal, expected);
        assert_eq!(cart.totals().subtotal.to_cents(), 3 * 8999);
    }

    #[test]
    fn test_update_quantity_rejects_below_one() {
        let mut cart = Cart::new();
        let journal = sample("P001", 2499);
        cart.add_item(&journal);
        cart.add_item(&journal);
        assert_eq!(cart.update_quantity(&journal.id, 0), Err(CartError::InvalidQuantity));
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_update_quantity_missing_line() {
        let mut cart = Cart::new();
        let id = ProductId::new("P404").unwrap();
        assert_eq!(cart.update_quantity(&id, 2), Err(CartError::LineNotFound));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&sample("P001", 2499));
        cart.remove_item(&ProductId::new("P404").unwrap());
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_totals_example() {
        // One line {price: 24.99, quantity: 2}: shipping 5.99, tax 3.9984,
        // total 59.9684 displayed as 59.97.
        let mut cart = Cart::new();
        let journal = sample("P001", 2499);
        cart.add_item(&journal);
        cart.update_quantity(&journal.id, 2).unwrap();

        let totals = cart.totals();
        assert_eq!(totals.subtotal.to_cents(), 4998);
        assert_eq!(totals.shipping.to_cents(), 599);
        assert_eq!(totals.tax.amount(), Decimal::new(39984, 4));
        assert_eq!(totals.total.amount(), Decimal::new(599684, 4));
        assert_eq!(totals.total.to_string(), "59.97");
    }

    #[test]
    fn test_empty_cart_has_no_shipping() {
        let mut cart = Cart::new();
        assert_eq!(cart.totals().total, Money::ZERO);
        cart.add_item(&sample("P001", 2499));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.totals().shipping, Money::ZERO);
    }
}
