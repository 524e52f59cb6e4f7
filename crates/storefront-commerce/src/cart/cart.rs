//! Cart and cart line types.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{OrderLineId, ProductId, Sequence};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A shopping cart owned by one session.
///
/// Invariants held by every mutation:
/// - at most one line per product ID
/// - every line quantity is positive
/// - a line never holds more than the product's stock as read when the line
///   was last changed
///
/// Deserializing re-checks these and rejects a cart that breaks them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "SavedCart")]
pub struct Cart {
    lines: Vec<CartLine>,
    line_ids: Sequence,
}

/// Wire form of a cart before its invariants are checked.
#[derive(Deserialize)]
struct SavedCart {
    lines: Vec<CartLine>,
    #[serde(default)]
    line_ids: Sequence,
}

impl TryFrom<SavedCart> for Cart {
    type Error = CommerceError;

    fn try_from(saved: SavedCart) -> Result<Self, Self::Error> {
        let mut line_ids = saved.line_ids;
        for (i, line) in saved.lines.iter().enumerate() {
            if line.quantity <= 0 {
                return Err(CommerceError::InvalidQuantity(line.quantity));
            }
            if line.quantity > line.product.stock {
                return Err(CommerceError::InsufficientStock {
                    product_id: line.product.id,
                    requested: line.quantity,
                    available: line.product.stock,
                });
            }
            let earlier = &saved.lines[..i];
            if earlier.iter().any(|l| l.product.id == line.product.id) {
                return Err(CommerceError::DuplicateProductLine(line.product.id));
            }
            if earlier.iter().any(|l| l.line_id == line.line_id) {
                return Err(CommerceError::DuplicateLineId(line.line_id));
            }
            line_ids.skip_past(line.line_id.get());
        }

        Ok(Self {
            lines: saved.lines,
            line_ids,
        })
    }
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add units of a product, merging into its existing line.
    ///
    /// Requests above the remaining stock headroom are clamped. A
    /// non-positive quantity, or a product whose stock is already fully in
    /// the cart, leaves the cart untouched.
    ///
    /// Returns the number of units actually added (0 for a no-op).
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> i64 {
        if quantity <= 0 {
            debug!(product_id = %product.id, quantity, "ignoring non-positive add");
            return 0;
        }

        let position = self.position_of(product.id);
        let current = position.map(|i| self.lines[i].quantity).unwrap_or(0);
        let allowed = product.stock - current;
        if allowed <= 0 {
            debug!(product_id = %product.id, current, stock = product.stock, "no stock headroom");
            return 0;
        }

        let added = quantity.min(allowed);
        if added < quantity {
            debug!(
                product_id = %product.id,
                requested = quantity,
                added,
                "clamped add to remaining stock"
            );
        }

        match position {
            Some(i) => self.lines[i].quantity += added,
            None => {
                let line_id = OrderLineId::new(self.line_ids.next());
                self.lines.push(CartLine {
                    line_id,
                    product: product.clone(),
                    quantity: added,
                });
            }
        }
        added
    }

    /// Add units of a product that may not have resolved.
    ///
    /// A missing product is a no-op, same as any other degraded request.
    pub fn add_item_from(&mut self, product: Option<&Product>, quantity: i64) -> i64 {
        match product {
            Some(product) => self.add_item(product, quantity),
            None => {
                debug!(quantity, "ignoring add for unknown product");
                0
            }
        }
    }

    /// Remove every line for a product. Missing lines are ignored.
    pub fn remove_line(&mut self, product: &Product) {
        self.remove_product(product.id);
    }

    /// Remove every line for a product ID.
    pub fn remove_product(&mut self, product_id: ProductId) {
        let len_before = self.lines.len();
        self.lines.retain(|l| l.product.id != product_id);
        if self.lines.len() < len_before {
            debug!(%product_id, "removed cart line");
        }
    }

    /// Sum of price times quantity over all lines.
    pub fn total_value(&self) -> f64 {
        self.lines.iter().map(CartLine::total).sum()
    }

    /// Average price per unit in the cart, or 0 for an empty cart.
    pub fn average_value(&self) -> f64 {
        let count = self.item_count();
        if count == 0 {
            return 0.0;
        }
        self.total_value() / count as f64
    }

    /// Find the product held by the line for `product_id`.
    pub fn find_product_in_cart_lines(&self, product_id: ProductId) -> Option<&Product> {
        self.line_for(product_id).map(|l| &l.product)
    }

    /// Get a line by insertion position.
    ///
    /// Positions shift whenever a line is removed, so an index is only
    /// meaningful until the next mutation.
    pub fn cart_line_by_index(&self, index: usize) -> Result<&CartLine, CommerceError> {
        self.lines
            .get(index)
            .ok_or(CommerceError::LineIndexOutOfRange {
                index,
                len: self.lines.len(),
            })
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the line for a product ID.
    pub fn line_for(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position_of(&self, product_id: ProductId) -> Option<usize> {
        self.lines.iter().position(|l| l.product.id == product_id)
    }
}

/// One product and its quantity inside a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Line identifier, unique within its cart.
    pub line_id: OrderLineId,
    /// Product snapshot taken when the line was created.
    pub product: Product,
    /// Quantity, always positive.
    pub quantity: i64,
}

impl CartLine {
    /// Price times quantity.
    pub fn total(&self) -> f64 {
        self.product.price * self.quantity as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_a() -> Product {
        Product::new(1, "Product A", 10.0, 5)
    }

    fn product_b() -> Product {
        Product::new(2, "Product B", 5.0, 10)
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_item(&product_a(), 2), 2);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.lines()[0].product.id, ProductId::new(1));
    }

    #[test]
    fn test_add_same_item_merges_line() {
        let mut cart = Cart::new();
        cart.add_item(&product_a(), 1);
        cart.add_item(&product_a(), 2);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn test_add_clamps_to_stock() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_item(&product_a(), 3), 3);
        assert_eq!(cart.add_item(&product_a(), 4), 2);

        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn test_first_add_above_stock_is_clamped() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_item(&product_a(), 50), 5);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_add_without_headroom_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&product_a(), 5);
        let before = cart.clone();

        assert_eq!(cart.add_item(&product_a(), 1), 0);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_add_out_of_stock_product_creates_no_line() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_item(&Product::new(3, "Gone", 1.0, 0), 1), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_invalid_quantity_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&product_a(), 2);
        let before = cart.clone();

        assert_eq!(cart.add_item(&product_a(), 0), 0);
        assert_eq!(cart.add_item(&product_a(), -3), 0);
        assert_eq!(cart.add_item(&product_b(), -1), 0);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_missing_product_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&product_a(), 1);
        let before = cart.clone();

        assert_eq!(cart.add_item_from(None, 3), 0);
        assert_eq!(cart, before);
        assert_eq!(cart.add_item_from(Some(&product_b()), 3), 3);
    }

    #[test]
    fn test_lower_stock_snapshot_blocks_further_adds() {
        let mut cart = Cart::new();
        cart.add_item(&product_a(), 4);

        let mut restocked_lower = product_a();
        restocked_lower.stock = 3;
        assert_eq!(cart.add_item(&restocked_lower, 1), 0);
        assert_eq!(cart.lines()[0].quantity, 4);
    }

    #[test]
    fn test_remove_line() {
        let mut cart = Cart::new();
        cart.add_item(&product_a(), 2);
        cart.add_item(&product_b(), 1);

        cart.remove_line(&product_a());
        assert!(cart.find_product_in_cart_lines(ProductId::new(1)).is_none());
        assert_eq!(cart.len(), 1);

        cart.remove_line(&product_a());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        assert_eq!(cart.total_value(), 0.0);
        assert_eq!(cart.average_value(), 0.0);

        cart.add_item(&product_a(), 2);
        cart.add_item(&product_b(), 3);

        assert!((cart.total_value() - 35.0).abs() < 1e-9);
        assert!((cart.average_value() - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_find_product() {
        let mut cart = Cart::new();
        cart.add_item(&product_b(), 1);

        assert_eq!(
            cart.find_product_in_cart_lines(ProductId::new(2)).map(|p| p.name.as_str()),
            Some("Product B")
        );
        assert!(cart.find_product_in_cart_lines(ProductId::new(1)).is_none());
    }

    #[test]
    fn test_line_by_index() {
        let mut cart = Cart::new();
        cart.add_item(&product_b(), 1);
        cart.add_item(&product_a(), 1);

        assert_eq!(cart.cart_line_by_index(0).unwrap().product.id, ProductId::new(2));
        assert_eq!(cart.cart_line_by_index(1).unwrap().product.id, ProductId::new(1));
        assert_eq!(
            cart.cart_line_by_index(2),
            Err(CommerceError::LineIndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_line_ids_are_not_reused() {
        let mut cart = Cart::new();
        cart.add_item(&product_a(), 1);
        cart.remove_line(&product_a());
        cart.add_item(&product_b(), 1);

        assert_eq!(cart.lines()[0].line_id, OrderLineId::new(2));
    }

    #[test]
    fn test_add_remove_clear_scenario() {
        let mut cart = Cart::new();
        cart.add_item(&product_a(), 3);
        cart.add_item(&product_a(), 4);
        assert_eq!(cart.lines()[0].quantity, 5);

        cart.remove_line(&product_a());
        assert!(cart.lines().is_empty());

        cart.clear();
        assert!(cart.is_empty());
    }

    fn saved_line(line_id: i64, product_id: i64, quantity: i64) -> serde_json::Value {
        serde_json::json!({
            "line_id": line_id,
            "product": { "id": product_id, "name": "Saved", "price": 10.0, "stock": 5 },
            "quantity": quantity,
        })
    }

    fn restore(lines: Vec<serde_json::Value>) -> Result<Cart, serde_json::Error> {
        serde_json::from_value(serde_json::json!({ "lines": lines }))
    }

    #[test]
    fn test_restored_cart_keeps_issuing_fresh_line_ids() {
        let mut cart = Cart::new();
        cart.add_item(&product_a(), 2);
        cart.add_item(&product_b(), 1);
        cart.remove_line(&product_b());

        let json = serde_json::to_string(&cart).unwrap();
        let mut restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);

        restored.add_item(&product_b(), 1);
        assert_eq!(restored.lines()[1].line_id, OrderLineId::new(3));
    }

    #[test]
    fn test_restore_without_sequence_skips_existing_ids() {
        let mut cart = restore(vec![saved_line(7, 1, 2)]).unwrap();
        cart.add_item(&product_b(), 1);
        assert_eq!(cart.lines()[1].line_id, OrderLineId::new(8));
    }

    #[test]
    fn test_restore_rejects_zero_quantity_line() {
        let err = restore(vec![saved_line(1, 1, 0)]).unwrap_err();
        assert!(err.to_string().contains("Invalid quantity"));
    }

    #[test]
    fn test_restore_rejects_quantity_above_stock() {
        let err = restore(vec![saved_line(1, 1, 99)]).unwrap_err();
        assert!(err.to_string().contains("Insufficient stock"));
    }

    #[test]
    fn test_restore_rejects_duplicate_lines() {
        let err = restore(vec![saved_line(1, 1, 1), saved_line(2, 1, 2)]).unwrap_err();
        assert!(err.to_string().contains("Duplicate cart line for product 1"));

        let err = restore(vec![saved_line(1, 1, 1), saved_line(1, 2, 2)]).unwrap_err();
        assert!(err.to_string().contains("Duplicate cart line ID 1"));
    }
}
