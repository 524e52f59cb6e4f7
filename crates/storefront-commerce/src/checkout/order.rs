//! Order types.

use crate::cart::{Cart, CartLine};
use crate::checkout::OrderField;
use crate::ids::OrderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contact and shipping details entered at checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderForm {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
}

impl OrderForm {
    /// Trimmed value of a field, or `None` when absent or blank.
    pub fn value(&self, field: OrderField) -> Option<&str> {
        let raw = match field {
            OrderField::Name => &self.name,
            OrderField::Address => &self.address,
            OrderField::City => &self.city,
            OrderField::Zip => &self.zip,
            OrderField::Country => &self.country,
        };
        raw.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    /// Format the shipping address on one line.
    pub fn one_line(&self) -> String {
        [OrderField::Address, OrderField::City, OrderField::Zip, OrderField::Country]
            .iter()
            .filter_map(|f| self.value(*f))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Customer name.
    pub name: Option<String>,
    /// Street address.
    pub address: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    /// When the order was placed.
    pub date: DateTime<Utc>,
    /// Cart lines at the moment of checkout.
    pub lines: Vec<CartLine>,
}

impl Order {
    /// Create an order from a validated form and the cart being checked out.
    pub fn new(id: OrderId, form: &OrderForm, cart: &Cart) -> Self {
        let field = |f: OrderField| form.value(f).map(str::to_string);
        Self {
            id,
            name: field(OrderField::Name),
            address: field(OrderField::Address),
            city: field(OrderField::City),
            zip: field(OrderField::Zip),
            country: field(OrderField::Country),
            date: Utc::now(),
            lines: cart.lines().to_vec(),
        }
    }

    /// Sum of line totals.
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::total).sum()
    }

    /// Sum of line quantities.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;

    #[test]
    fn test_form_value_trims_and_blanks() {
        let form = OrderForm {
            name: Some("  Grace  ".into()),
            zip: Some(" ".into()),
            ..Default::default()
        };
        assert_eq!(form.value(OrderField::Name), Some("Grace"));
        assert_eq!(form.value(OrderField::Zip), None);
        assert_eq!(form.value(OrderField::City), None);
    }

    #[test]
    fn test_one_line_address() {
        let form = OrderForm {
            address: Some("1 rue de Rivoli".into()),
            city: Some("Paris".into()),
            country: Some("France".into()),
            ..Default::default()
        };
        assert_eq!(form.one_line(), "1 rue de Rivoli, Paris, France");
    }

    #[test]
    fn test_order_snapshots_cart() {
        let mut cart = Cart::new();
        cart.add_item(&Product::new(1, "A", 2.5, 10), 4);
        let form = OrderForm {
            name: Some("Grace".into()),
            ..Default::default()
        };

        let order = Order::new(OrderId::new(1), &form, &cart);
        cart.clear();

        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.item_count(), 4);
        assert!((order.total() - 10.0).abs() < 1e-9);
        assert_eq!(order.name.as_deref(), Some("Grace"));
        assert!(order.address.is_none());
    }
}
