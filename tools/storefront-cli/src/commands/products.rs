//! Catalog listing.

use anyhow::Result;
use storefront_commerce::catalog::{Product, ProductService};

use super::ProductsArgs;
use crate::context::Context;
use crate::output::{format_price, stock_badge};

const WIDTHS: [usize; 4] = [4, 40, 10, 8];

/// Run the products command.
pub fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let service = ProductService::new(ctx.config.catalog());
    let products: Vec<Product> = service
        .get_all_products()
        .into_iter()
        .filter(|p| !args.in_stock || p.in_stock())
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!("{} catalog", ctx.config.shop.name));

    if products.is_empty() {
        ctx.output.info("No products available.");
        return Ok(());
    }

    ctx.output.table_row(&["ID", "NAME", "PRICE", "STOCK"], &WIDTHS);
    ctx.output.rule(WIDTHS.iter().sum::<usize>() + 6);
    for product in &products {
        ctx.output.table_row(
            &[
                &product.id.to_string(),
                &product.name,
                &format_price(product.price),
                &stock_badge(product.stock),
            ],
            &WIDTHS,
        );
        if !product.description.is_empty() {
            ctx.output.debug(&product.description);
        }
    }

    Ok(())
}
