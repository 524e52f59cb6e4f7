//! Commerce error types.

use crate::checkout::ValidationErrors;
use crate::ids::{OrderLineId, ProductId};
use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Cart mutations never produce these: degraded add/remove requests are
/// silent no-ops. Errors come from positional access, restoring a saved
/// cart, the catalog and the checkout step.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Catalog cannot cover a stock decrement.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Positional cart access beyond the current line count.
    #[error("Cart line index {index} out of range (cart has {len} lines)")]
    LineIndexOutOfRange { index: usize, len: usize },

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Order form failed validation.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// A restored cart holds two lines for one product.
    #[error("Duplicate cart line for product {0}")]
    DuplicateProductLine(ProductId),

    /// A restored cart reuses a line ID.
    #[error("Duplicate cart line ID {0}")]
    DuplicateLineId(OrderLineId),
}

impl From<ValidationErrors> for CommerceError {
    fn from(e: ValidationErrors) -> Self {
        CommerceError::Validation(e)
    }
}
