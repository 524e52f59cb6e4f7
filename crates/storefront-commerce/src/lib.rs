//! Cart, catalog and checkout domain logic for the storefront.
//!
//! - **Catalog**: products, the `ProductCatalog` seam and `ProductService`
//! - **Cart**: the session cart with stock-ceiling enforcement and totals
//! - **Checkout**: order form validation with localized messages and the
//!   coordinator that commits stock and clears the cart
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//!
//! let catalog = InMemoryCatalog::new(vec![
//!     Product::new(1, "Echo Dot", 92.50, 10),
//!     Product::new(2, "Anker 3ft Cable", 9.99, 20),
//! ]);
//! let service = ProductService::new(catalog);
//!
//! let mut cart = Cart::new();
//! service.add_to_cart(&mut cart, ProductId::new(1), 2);
//! service.add_to_cart(&mut cart, ProductId::new(99), 1); // unknown id, ignored
//!
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.total_value(), 185.0);
//! ```

pub mod error;
pub mod ids;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::{OrderId, OrderLineId, ProductId};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::{OrderId, OrderLineId, ProductId};

    // Catalog
    pub use crate::catalog::{InMemoryCatalog, Product, ProductCatalog, ProductService};

    // Cart
    pub use crate::cart::{Cart, CartLine, CartSummary, LineSummary};

    // Checkout
    pub use crate::checkout::{
        CheckoutCoordinator, FieldRule, Locale, MessageKey, Order, OrderField, OrderForm,
        ValidationErrors, ValidationSchema,
    };
}
