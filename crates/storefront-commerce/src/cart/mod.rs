//! Shopping cart module.
//!
//! Contains the session cart, its lines, and the summary used for display.

mod cart;
mod summary;

pub use cart::{Cart, CartLine};
pub use summary::{CartSummary, LineSummary};
