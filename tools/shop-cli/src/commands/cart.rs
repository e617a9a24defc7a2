//! Cart commands.

use anyhow::{bail, Context as _, Result};
use console::style;
use dialoguer::Confirm;
use shop_cache::KvBackend;
use shop_commerce::cart::Cart;
use shop_commerce::store::CartStore;

use super::{CartArgs, CartCommand, CouponCommand, SelectionArgs};
use crate::context::Context;
use crate::output;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.cart_store()?;
    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add(args) => add(&args, &mut store, ctx)?,
        CartCommand::Remove { line } => {
            let index = line_index(line, store.cart())?;
            store.remove(index)?;
        }
        CartCommand::Update { line, quantity } => {
            let index = line_index(line, store.cart())?;
            store.update_quantity(index, quantity)?;
            ctx.output.success(&format!(
                "{} now x{}",
                store.cart().items()[index].label(),
                quantity
            ));
        }
        CartCommand::Clear { yes } => clear(yes, &mut store, ctx)?,
        CartCommand::Coupon { command } => coupon(command, &mut store, ctx)?,
    }
    show(&store, ctx);
    Ok(())
}

fn add<B: KvBackend>(args: &SelectionArgs, store: &mut CartStore<B>, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let selection = super::product::select(&catalog, args)?;
    let item = selection
        .to_cart_item()
        .context("This size is out of stock")?;
    ctx.output.debug(&format!("Adding {} x{}", item.label(), item.quantity));
    store.add(item)?;
    Ok(())
}

fn clear<B: KvBackend>(yes: bool, store: &mut CartStore<B>, ctx: &Context) -> Result<()> {
    if store.cart().is_empty() {
        ctx.output.info("Your cart is already empty");
        return Ok(());
    }
    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} item(s) from your cart?", store.cart().item_count()))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }
    store.clear();
    Ok(())
}

fn coupon<B: KvBackend>(command: CouponCommand, store: &mut CartStore<B>, ctx: &Context) -> Result<()> {
    let book = ctx.coupons()?;
    match command {
        CouponCommand::List => {
            if book.is_empty() {
                ctx.output.info("No coupons configured");
            }
            for coupon in book.iter() {
                let summary = coupon.summary(store.cart().pricing().currency);
                let text = match &coupon.description {
                    Some(description) => format!("{} ({})", summary, description),
                    None => summary,
                };
                ctx.output.kv(&coupon.code, &text);
            }
        }
        CouponCommand::Apply { code } => {
            store.apply_coupon(&code, &book)?;
        }
        CouponCommand::Remove => {
            if store.remove_coupon()?.is_none() {
                ctx.output.info("No coupon applied");
            }
        }
    }
    Ok(())
}

/// 1-based line number to an index into the cart.
fn line_index(line: usize, cart: &Cart) -> Result<usize> {
    if line == 0 || line > cart.items().len() {
        bail!(
            "No line {} in the cart ({} line(s)); see `shop cart show`",
            line,
            cart.items().len()
        );
    }
    Ok(line - 1)
}

fn show<B: KvBackend>(store: &CartStore<B>, ctx: &Context) {
    let cart = store.cart();
    if ctx.output.is_json() {
        ctx.output.json(cart);
        return;
    }

    ctx.output.header(&format!("Cart ({} items)", cart.item_count()));
    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }

    let widths = [3, 44, 10, 4, 10];
    ctx.output.table_row(&["#", "ITEM", "PRICE", "QTY", "TOTAL"], &widths);
    for (index, item) in cart.items().iter().enumerate() {
        let line = (index + 1).to_string();
        let unit = item.unit_price().map(|m| m.display()).unwrap_or_default();
        let total = item.line_total().map(|m| m.display()).unwrap_or_default();
        let quantity = item.quantity.to_string();
        ctx.output
            .table_row(&[&line, &item.label(), &unit, &quantity, &total], &widths);
    }

    let totals = cart.totals();
    println!();
    ctx.output.kv("subtotal", &totals.subtotal.display());
    if let Some(coupon) = cart.coupon() {
        let discount = format!("-{} ({})", totals.discount.display(), coupon.code);
        ctx.output.kv("discount", &style(discount).green().to_string());
    }
    let shipping = if totals.shipping.is_positive() {
        totals.shipping.display()
    } else {
        style("Free").green().to_string()
    };
    ctx.output.kv("shipping", &shipping);
    ctx.output.kv("total", &output::price(&totals.total));

    let remaining = store.remaining_for_free_shipping();
    if remaining.is_positive() {
        ctx.output.info(&format!(
            "Add {} more for free shipping",
            remaining.display()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_commerce::cart::CartItem;
    use shop_commerce::catalog::Catalog;
    use shop_commerce::ProductId;

    #[test]
    fn test_line_index_is_one_based() {
        let catalog = Catalog::demo().unwrap();
        let mut cart = Cart::new();
        let product = catalog.require(ProductId::new(2)).unwrap().clone();
        cart.add(CartItem::new(product, 0, 0, 1)).unwrap();

        assert_eq!(line_index(1, &cart).unwrap(), 0);
        assert!(line_index(0, &cart).is_err());
        assert!(line_index(2, &cart).is_err());
    }
}
