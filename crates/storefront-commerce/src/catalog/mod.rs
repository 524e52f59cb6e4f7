//! Product catalog module.
//!
//! Contains products, the catalog seam, and the service that commits cart
//! quantities against it.

mod inventory;
mod product;
mod service;

pub use inventory::{InMemoryCatalog, ProductCatalog};
pub use product::Product;
pub use service::ProductService;
