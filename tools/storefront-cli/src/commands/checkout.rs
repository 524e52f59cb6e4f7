//! Cart filling and order placement.

use anyhow::{bail, Result};
use serde::Serialize;
use storefront_commerce::cart::{Cart, CartSummary};
use storefront_commerce::catalog::{Product, ProductService};
use storefront_commerce::checkout::{CheckoutCoordinator, MessageKey, Order, OrderForm};
use storefront_commerce::CommerceError;
use tracing::debug;

use super::CheckoutArgs;
use crate::context::Context;
use crate::output::{format_price, stock_badge};

const WIDTHS: [usize; 4] = [40, 10, 6, 10];

#[derive(Serialize)]
struct CheckoutReport<'a> {
    cart: &'a CartSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<&'a Order>,
    remaining: Vec<Product>,
}

/// Run the checkout command.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let service = ProductService::new(ctx.config.catalog());
    let mut checkout = CheckoutCoordinator::with_schema(service, ctx.config.schema()?);

    let mut cart = Cart::new();
    for item in &args.items {
        let added = checkout
            .service()
            .add_to_cart(&mut cart, item.product_id, item.quantity);
        debug!(product_id = %item.product_id, requested = item.quantity, added, "cart add");
        if added == 0 {
            ctx.output
                .warn(&format!("Skipped product {} (x{})", item.product_id, item.quantity));
        } else if added < item.quantity {
            ctx.output.warn(&format!(
                "Only {} of {} units of product {} available",
                added, item.quantity, item.product_id
            ));
        }
    }

    let summary = CartSummary::from_cart(&cart);
    print_summary(&summary, ctx);

    if args.dry_run {
        if ctx.output.is_json() {
            ctx.output.json(&CheckoutReport {
                cart: &summary,
                order: None,
                remaining: Vec::new(),
            });
        }
        return Ok(());
    }

    let form = OrderForm {
        name: args.name,
        address: args.address,
        city: args.city,
        zip: args.zip,
        country: args.country,
    };

    let order = match checkout.place_order(&mut cart, &form) {
        Ok(order) => order,
        Err(CommerceError::EmptyCart) => bail!(MessageKey::CartEmpty.message(ctx.locale)),
        Err(CommerceError::Validation(errors)) => {
            for message in errors.messages(ctx.locale) {
                ctx.output.error(message);
            }
            bail!("Order form is incomplete ({} field(s))", errors.errors().len());
        }
        Err(e) => return Err(e.into()),
    };

    let remaining: Vec<Product> = order
        .lines
        .iter()
        .map(|line| {
            checkout
                .service()
                .get_product_by_id(line.product.id)
                .unwrap_or_else(|| Product {
                    stock: 0,
                    ..line.product.clone()
                })
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&CheckoutReport {
            cart: &summary,
            order: Some(&order),
            remaining,
        });
        return Ok(());
    }

    ctx.output.success(&format!(
        "Order #{} placed for {}",
        order.id,
        format_price(order.total())
    ));
    if let Some(ref name) = order.name {
        ctx.output.kv("name", name);
    }
    let address = form.one_line();
    if !address.is_empty() {
        ctx.output.kv("ship to", &address);
    }
    ctx.output
        .kv("date", &order.date.format("%Y-%m-%d %H:%M:%S UTC").to_string());

    ctx.output.header("Remaining stock");
    for product in &remaining {
        ctx.output
            .list_item(&format!("{}: {}", product.name, stock_badge(product.stock)));
    }

    Ok(())
}

fn print_summary(summary: &CartSummary, ctx: &Context) {
    ctx.output.header("Cart");
    if summary.is_empty() {
        ctx.output.info(MessageKey::CartEmpty.message(ctx.locale));
        return;
    }

    ctx.output.table_row(&["PRODUCT", "PRICE", "QTY", "TOTAL"], &WIDTHS);
    ctx.output.rule(WIDTHS.iter().sum::<usize>() + 6);
    for line in &summary.lines {
        ctx.output.table_row(
            &[
                &line.name,
                &format_price(line.unit_price),
                &line.quantity.to_string(),
                &format_price(line.line_total),
            ],
            &WIDTHS,
        );
    }
    ctx.output.kv("items", &summary.item_count.to_string());
    ctx.output.kv("total", &format_price(summary.total));
    ctx.output.kv("average", &format_price(summary.average));
}
