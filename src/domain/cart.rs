use chrono::{DateTime, Utc};
use thiserror::Error;

use super::money::{Cents, format_cents};
use super::product::CartLine;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("There is nothing to pay.")]
    Empty,

    #[error(
        "Insufficient amount: total is ${}, received ${}",
        dollars(.total),
        dollars(.tendered)
    )]
    InsufficientAmount { total: Cents, tendered: Cents },

    #[error("The cart total is too large.")]
    TotalOutOfRange,
}

fn dollars(cents: &Cents) -> String {
    format_cents(*cents)
}

/// Outcome of a successful settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub lines: Vec<CartLine>,
    pub total: Cents,
    pub tendered: Cents,
    pub change: Cents,
    pub paid_at: DateTime<Utc>,
}

/// Purchased lines awaiting payment. Lives only for the session.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line. Repeated purchases of the same product stay separate.
    pub fn add_line(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of every line's subtotal, or `None` if it does not fit in `Cents`.
    pub fn total(&self) -> Option<Cents> {
        self.lines
            .iter()
            .try_fold(0, |total: Cents, line| total.checked_add(line.subtotal()?))
    }

    /// The total the cart would have after adding `line`.
    pub fn total_with(&self, line: &CartLine) -> Option<Cents> {
        self.total()?.checked_add(line.subtotal()?)
    }

    /// Pay for the cart. On success the cart is emptied and the receipt
    /// carries the settled lines; on failure nothing changes.
    pub fn settle(&mut self, tendered: Cents) -> Result<Receipt, CartError> {
        if self.lines.is_empty() {
            return Err(CartError::Empty);
        }

        let total = self.total().ok_or(CartError::TotalOutOfRange)?;
        if tendered < total {
            return Err(CartError::InsufficientAmount { total, tendered });
        }

        Ok(Receipt {
            lines: std::mem::take(&mut self.lines),
            total,
            tendered,
            change: tendered - total,
            paid_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart_with(lines: &[(&str, Cents, u32)]) -> Cart {
        let mut cart = Cart::new();
        for (name, price, qty) in lines {
            cart.add_line(CartLine::new(*name, *price, *qty));
        }
        cart
    }

    #[test]
    fn test_add_line_does_not_merge() {
        let cart = cart_with(&[("Pen", 150, 1), ("Pen", 150, 2)]);
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), Some(450));
    }

    #[test]
    fn test_settle_empty_cart() {
        let mut cart = Cart::new();
        assert_eq!(cart.settle(1000), Err(CartError::Empty));
    }

    #[test]
    fn test_settle_insufficient_amount_keeps_lines() {
        let mut cart = cart_with(&[("Pen", 150, 3), ("Mug", 900, 1)]);

        let err = cart.settle(1000).unwrap_err();
        assert_eq!(
            err,
            CartError::InsufficientAmount {
                total: 1350,
                tendered: 1000
            }
        );
        assert_eq!(
            err.to_string(),
            "Insufficient amount: total is $13.50, received $10.00"
        );
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), Some(1350));
    }

    #[test]
    fn test_settle_computes_change_and_clears() {
        let mut cart = cart_with(&[("Pen", 150, 3)]);

        let receipt = cart.settle(500).unwrap();
        assert_eq!(receipt.total, 450);
        assert_eq!(receipt.change, 50);
        assert_eq!(format_cents(receipt.change), "0.50");
        assert_eq!(receipt.lines, vec![CartLine::new("Pen", 150, 3)]);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_settle_exact_amount() {
        let mut cart = cart_with(&[("Pen", 150, 2)]);

        let receipt = cart.settle(300).unwrap();
        assert_eq!(receipt.change, 0);
        assert!(cart.is_empty());
        assert_eq!(cart.settle(300), Err(CartError::Empty));
    }

    #[test]
    fn test_total_overflow_refuses_settlement() {
        let mut cart = cart_with(&[("Gold", 5_000_000_000_000_000_000, 1)]);
        let more = CartLine::new("Gold", 5_000_000_000_000_000_000, 1);
        assert_eq!(cart.total_with(&more), None);
        assert_eq!(cart.total_with(&CartLine::new("Pen", 150, 1)), Some(5_000_000_000_000_000_150));

        cart.add_line(more);
        assert_eq!(cart.total(), None);
        assert_eq!(cart.settle(Cents::MAX), Err(CartError::TotalOutOfRange));
        assert_eq!(cart.len(), 2);
    }
}
