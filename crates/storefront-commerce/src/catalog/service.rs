//! Product lookups and the inventory commit step.

use crate::cart::Cart;
use crate::catalog::{Product, ProductCatalog};
use crate::error::CommerceError;
use crate::ids::ProductId;
use tracing::{info, warn};

/// Product operations over a catalog.
#[derive(Debug, Clone)]
pub struct ProductService<C> {
    catalog: C,
}

impl<C: ProductCatalog> ProductService<C> {
    /// Wrap a catalog.
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// List every product in the catalog.
    pub fn get_all_products(&self) -> Vec<Product> {
        self.catalog.get_all()
    }

    /// Look up a product by ID.
    pub fn get_product_by_id(&self, id: ProductId) -> Option<Product> {
        self.catalog.get_product_by_id(id)
    }

    /// Resolve `id` and add it to `cart`.
    ///
    /// Unknown IDs are ignored like any other degraded add. Returns the
    /// number of units added.
    pub fn add_to_cart(&self, cart: &mut Cart, id: ProductId, quantity: i64) -> i64 {
        let product = self.catalog.get_product_by_id(id);
        cart.add_item_from(product.as_ref(), quantity)
    }

    /// Decrement catalog stock for every cart line, in cart order.
    ///
    /// Not atomic: the first failing decrement is returned and decrements
    /// already applied for earlier lines stay applied. The cart itself is not
    /// touched.
    pub fn update_product_quantities(&mut self, cart: &Cart) -> Result<(), CommerceError> {
        for line in cart.lines() {
            if let Err(e) = self.catalog.decrement_stock(line.product.id, line.quantity) {
                warn!(product_id = %line.product.id, quantity = line.quantity, error = %e, "stock commit failed");
                return Err(e);
            }
            info!(product_id = %line.product.id, quantity = line.quantity, "committed stock");
        }
        Ok(())
    }

    /// Borrow the underlying catalog.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Mutably borrow the underlying catalog.
    pub fn catalog_mut(&mut self) -> &mut C {
        &mut self.catalog
    }
}
