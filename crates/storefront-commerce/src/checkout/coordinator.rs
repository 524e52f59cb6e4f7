//! Checkout coordination: validate, commit stock, clear the cart.

use crate::cart::Cart;
use crate::catalog::{ProductCatalog, ProductService};
use crate::checkout::{Order, OrderForm, ValidationSchema};
use crate::error::CommerceError;
use crate::ids::{OrderId, Sequence};
use tracing::info;

/// Turns a cart and an order form into a placed order.
#[derive(Debug)]
pub struct CheckoutCoordinator<C> {
    service: ProductService<C>,
    schema: ValidationSchema,
    orders: Vec<Order>,
    order_ids: Sequence,
}

impl<C: ProductCatalog> CheckoutCoordinator<C> {
    /// Create a coordinator with the default validation schema.
    pub fn new(service: ProductService<C>) -> Self {
        Self::with_schema(service, ValidationSchema::default())
    }

    /// Create a coordinator with custom field rules.
    pub fn with_schema(service: ProductService<C>, schema: ValidationSchema) -> Self {
        Self {
            service,
            schema,
            orders: Vec::new(),
            order_ids: Sequence::default(),
        }
    }

    /// Place an order for everything in `cart`.
    ///
    /// Steps, in order: reject an empty cart, validate the form, commit stock
    /// for each line, clear the cart, record the order. Any failure before
    /// the clear leaves the cart as it was so the caller can retry; a failed
    /// stock commit may still have decremented earlier lines.
    pub fn place_order(
        &mut self,
        cart: &mut Cart,
        form: &OrderForm,
    ) -> Result<Order, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        self.schema.validate(form)?;

        // Snapshot before committing so the order reflects what was bought.
        let mut order = Order::new(OrderId::new(0), form, cart);
        self.service.update_product_quantities(cart)?;
        cart.clear();

        order.id = OrderId::new(self.order_ids.next());
        info!(
            order_id = %order.id,
            lines = order.lines.len(),
            total = order.total(),
            "order placed"
        );
        self.orders.push(order.clone());
        Ok(order)
    }

    /// Orders placed so far, oldest first.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Field rules applied to every order form.
    pub fn schema(&self) -> &ValidationSchema {
        &self.schema
    }

    /// Product service backing stock lookups and commits.
    pub fn service(&self) -> &ProductService<C> {
        &self.service
    }

    /// Mutable access to the product service.
    pub fn service_mut(&mut self) -> &mut ProductService<C> {
        &mut self.service
    }
}
