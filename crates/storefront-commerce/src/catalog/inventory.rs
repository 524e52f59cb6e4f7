//! Catalog storage and stock tracking.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use tracing::debug;

/// Source of products and owner of their stock counters.
///
/// Lookups hand out owned snapshots so implementations backed by a database
/// or remote service fit the same seam as the in-memory catalog.
pub trait ProductCatalog {
    /// Look up a product by ID.
    fn get_product_by_id(&self, id: ProductId) -> Option<Product>;

    /// List every product in catalog order.
    fn get_all(&self) -> Vec<Product>;

    /// Remove `quantity` units from a product's stock.
    fn decrement_stock(&mut self, id: ProductId, quantity: i64) -> Result<(), CommerceError>;
}

/// Catalog kept in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    /// Create a catalog from a product list.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Add a product, replacing any existing product with the same ID.
    pub fn insert(&mut self, product: Product) {
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product,
            None => self.products.push(product),
        }
    }

    /// Number of listed products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if nothing is listed.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductCatalog for InMemoryCatalog {
    fn get_product_by_id(&self, id: ProductId) -> Option<Product> {
        self.products.iter().find(|p| p.id == id).cloned()
    }

    fn get_all(&self) -> Vec<Product> {
        self.products.clone()
    }

    /// Sold-out products are dropped from the listing.
    fn decrement_stock(&mut self, id: ProductId, quantity: i64) -> Result<(), CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(CommerceError::ProductNotFound(id))?;

        let product = &mut self.products[index];
        if quantity > product.stock {
            return Err(CommerceError::InsufficientStock {
                product_id: id,
                requested: quantity,
                available: product.stock,
            });
        }

        product.stock -= quantity;
        if product.stock == 0 {
            debug!(product_id = %id, "product sold out, removing from catalog");
            self.products.remove(index);
        }
        Ok(())
    }
}
