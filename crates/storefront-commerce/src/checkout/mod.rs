//! Checkout module.
//!
//! Contains the order form and its validation rules, placed orders, and the
//! coordinator that commits a cart against the catalog.

mod coordinator;
mod order;
mod validation;

pub use coordinator::CheckoutCoordinator;
pub use order::{Order, OrderForm};
pub use validation::{
    FieldError, FieldRule, Locale, MessageKey, OrderField, UnknownOrderField, ValidationErrors,
    ValidationSchema,
};
