//! Display snapshot of a cart's totals.

use crate::cart::Cart;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Totals for a cart, as shown on a review screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartSummary {
    /// Per-line breakdown, in cart order.
    pub lines: Vec<LineSummary>,
    /// Sum of line quantities.
    pub item_count: i64,
    /// Sum of line totals.
    pub total: f64,
    /// Average price per unit.
    pub average: f64,
}

impl CartSummary {
    /// Build a summary from the current cart contents.
    pub fn from_cart(cart: &Cart) -> Self {
        let lines = cart
            .lines()
            .iter()
            .map(|line| LineSummary {
                product_id: line.product.id,
                name: line.product.name.clone(),
                unit_price: line.product.price,
                quantity: line.quantity,
                line_total: line.total(),
            })
            .collect();

        Self {
            lines,
            item_count: cart.item_count(),
            total: cart.total_value(),
            average: cart.average_value(),
        }
    }

    /// Check if the summarized cart had no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// One row of a cart summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineSummary {
    /// Product ID.
    pub product_id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub unit_price: f64,
    /// Quantity.
    pub quantity: i64,
    /// unit_price * quantity.
    pub line_total: f64,
}
