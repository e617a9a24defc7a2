//! Product detail view.

use anyhow::{bail, Context as _, Result};
use console::style;
use serde::Serialize;
use shop_commerce::catalog::{Catalog, Product};
use shop_commerce::routes::Route;
use shop_commerce::selector::VariantSelection;
use shop_commerce::{ColorId, ProductId};

use super::{ProductArgs, SelectionArgs};
use crate::context::Context;
use crate::output;

/// Run the product command.
pub fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let selection = select(&catalog, &args.selection)?;

    if ctx.output.is_json() {
        ctx.output.json(&SelectionView::new(&selection));
    } else {
        show(&selection, ctx);
    }

    if args.add {
        let item = selection
            .to_cart_item()
            .context("This size is out of stock")?;
        let mut store = ctx.cart_store()?;
        store.add(item)?;
    }

    Ok(())
}

/// Resolve colour, size and quantity flags against a product.
pub fn select<'a>(catalog: &'a Catalog, args: &SelectionArgs) -> Result<VariantSelection<'a>> {
    let product = catalog.require(ProductId::new(args.id))?;
    let mut selection = VariantSelection::new(product);

    if let Some(color) = &args.color {
        let index = product
            .variants
            .iter()
            .position(|v| v.matches_color(&ColorId::new(color)))
            .with_context(|| {
                format!(
                    "{} does not come in '{}' (available: {})",
                    product.name,
                    color,
                    colour_names(product)
                )
            })?;
        selection.select_variant(index)?;
    }

    if let Some(size) = &args.size {
        if !selection.select_size(size) {
            let variant = selection.variant().map(|v| v.color_name.as_str()).unwrap_or("");
            let known = selection
                .variant()
                .is_some_and(|v| v.find_size(size).is_some());
            if known {
                bail!("{} in {} is sold out in size {}", product.name, variant, size);
            }
            bail!("{} has no size '{}' in {}", product.name, size, variant);
        }
    }

    if args.quantity != selection.quantity() && !selection.set_quantity(args.quantity) {
        bail!(
            "Cannot select {} of {}: {} in stock",
            args.quantity,
            product.name,
            selection.current_stock()
        );
    }

    Ok(selection)
}

fn colour_names(product: &Product) -> String {
    product
        .variants
        .iter()
        .map(|v| v.color_name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SelectionView<'a> {
    path: String,
    #[serde(flatten)]
    selection: &'a VariantSelection<'a>,
    price: String,
    stock: u32,
    stock_label: String,
    can_add_to_cart: bool,
}

impl<'a> SelectionView<'a> {
    fn new(selection: &'a VariantSelection<'a>) -> Self {
        let (stock_label, _) = selection.stock_label();
        Self {
            path: Route::Product(selection.product().id).path(),
            selection,
            price: selection.current_price().display(),
            stock: selection.current_stock(),
            stock_label,
            can_add_to_cart: selection.can_add_to_cart(),
        }
    }
}

fn show(selection: &VariantSelection<'_>, ctx: &Context) {
    let product = selection.product();
    ctx.output.header(&product.name);
    ctx.output.kv("path", &Route::Product(product.id).path());
    ctx.output.kv("category", &product.category);
    ctx.output.kv("rating", &output::rating(product.rating, product.review_count));
    if !product.badges.is_empty() {
        let badges: Vec<&str> = product.badges.iter().map(|b| b.text.as_str()).collect();
        ctx.output.kv("badges", &badges.join(", "));
    }
    if let Some(discount) = product.discount {
        ctx.output.kv("discount", &format!("{}% off", discount));
    }
    if !product.description.is_empty() {
        ctx.output.kv("about", &product.description);
    }

    ctx.output.header("Colours");
    for (index, variant) in product.variants.iter().enumerate() {
        let marker = if index == selection.variant_index() { "●" } else { "○" };
        let stock = if variant.is_in_stock() { "" } else { " (sold out)" };
        ctx.output.list_item(&format!(
            "{} {} {}{}",
            marker,
            variant.color_name,
            style(&variant.color_code).dim(),
            stock
        ));
    }

    if let Some(variant) = selection.variant() {
        ctx.output.header("Sizes");
        for (index, size) in variant.sizes.iter().enumerate() {
            let marker = if Some(index) == selection.size_index() { "●" } else { "○" };
            ctx.output.list_item(&format!(
                "{} {:6} {:>8}  {}",
                marker,
                size.name,
                size.price.display(),
                output::stock_badge(size.stock)
            ));
        }
    }

    ctx.output.header("Selection");
    if let Some(image) = selection.image() {
        ctx.output.kv("image", image);
    }
    ctx.output.kv("price", &output::price(&selection.current_price()));
    ctx.output.kv("quantity", &selection.quantity().to_string());
    ctx.output.kv("stock", &output::stock_badge(selection.current_stock()));
    if !selection.can_add_to_cart() {
        ctx.output.warn("This selection cannot be added to the cart");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(id: u32, color: Option<&str>, size: Option<&str>, quantity: u32) -> SelectionArgs {
        SelectionArgs {
            id,
            color: color.map(String::from),
            size: size.map(String::from),
            quantity,
        }
    }

    #[test]
    fn test_select_colour_size_and_quantity() {
        let catalog = Catalog::demo().unwrap();
        let selection = select(&catalog, &args(5, Some("black"), Some("UK 9"), 2)).unwrap();
        let item = selection.to_cart_item().unwrap();
        assert_eq!(item.label(), "Casual Sneakers (Black, UK 9)");
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_select_rejects_unknown_and_sold_out() {
        let catalog = Catalog::demo().unwrap();
        assert!(select(&catalog, &args(99, None, None, 1)).is_err());
        assert!(select(&catalog, &args(1, Some("purple"), None, 1)).is_err());
        assert!(select(&catalog, &args(1, None, Some("XXXL"), 1)).is_err());

        let err = select(&catalog, &args(1, Some("black"), Some("XL"), 1)).unwrap_err();
        assert!(err.to_string().contains("sold out"));
    }

    #[test]
    fn test_select_rejects_quantity_over_stock() {
        let catalog = Catalog::demo().unwrap();
        assert!(select(&catalog, &args(1, None, Some("M"), 10_000)).is_err());
    }
}
