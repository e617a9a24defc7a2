//! Wishlist commands.

use anyhow::Result;
use dialoguer::Confirm;
use shop_commerce::ProductId;

use super::catalog::summary;
use super::{WishlistArgs, WishlistCommand};
use crate::context::Context;

/// Run the wishlist command.
pub fn run(args: WishlistArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.wishlist_store()?;

    match args.command.unwrap_or(WishlistCommand::List) {
        WishlistCommand::List => {}
        WishlistCommand::Add { id } => {
            let catalog = ctx.catalog()?;
            store.add(catalog.require(ProductId::new(id))?);
        }
        WishlistCommand::Remove { id } => {
            if store.remove(ProductId::new(id)).is_none() {
                ctx.output.info(&format!("Product {} is not in your wishlist", id));
            }
        }
        WishlistCommand::Toggle { id } => {
            let catalog = ctx.catalog()?;
            store.toggle(catalog.require(ProductId::new(id))?);
        }
        WishlistCommand::Clear { yes } => {
            if store.wishlist().is_empty() {
                ctx.output.info("Your wishlist is already empty");
            } else if yes
                || ctx.output.is_json()
                || Confirm::new()
                    .with_prompt(format!(
                        "Remove all {} product(s) from your wishlist?",
                        store.wishlist().len()
                    ))
                    .default(false)
                    .interact()?
            {
                store.clear();
            } else {
                ctx.output.info("Cancelled");
            }
        }
    }

    let wishlist = store.wishlist();
    if ctx.output.is_json() {
        ctx.output.json(wishlist);
        return Ok(());
    }

    ctx.output.header(&format!("Wishlist ({})", wishlist.len()));
    if wishlist.is_empty() {
        ctx.output.info("Your wishlist is empty");
    }
    for product in wishlist.items() {
        ctx.output.list_item(&summary(product));
    }

    Ok(())
}
