//! Product types.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Carts hold snapshots of these; only the catalog ever changes `stock`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Short description for listings.
    #[serde(default)]
    pub description: String,
    /// Longer detail text.
    #[serde(default)]
    pub details: String,
    /// Unit price.
    pub price: f64,
    /// Units available for sale.
    pub stock: i64,
}

impl Product {
    /// Create a new product.
    pub fn new(id: i64, name: impl Into<String>, price: f64, stock: i64) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            description: String::new(),
            details: String::new(),
            price,
            stock,
        }
    }

    /// Set the listing description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the detail text.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    /// Check if any units are left.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
