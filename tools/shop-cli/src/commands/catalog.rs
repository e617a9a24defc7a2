//! Catalog browsing commands.

use anyhow::{bail, Result};
use console::style;
use serde::Serialize;
use shop_commerce::catalog::{Catalog, Product, ProductFlag};
use shop_commerce::search::{apply, ActiveFilter, FacetCounts, FacetValue, FilterState, Page, SortKey};

use super::{CatalogArgs, CatalogCommand, FilterArgs, ListArgs};
use crate::context::Context;
use crate::output;

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    match args.command {
        CatalogCommand::List(args) => list(args, &catalog, ctx),
        CatalogCommand::Facets(args) => facets(&args, &catalog, ctx),
        CatalogCommand::Sorts => sorts(ctx),
    }
}

/// Build filter state from command-line filters.
///
/// Flag switches combine with OR, like repeated facet values.
pub fn filter_state(args: &FilterArgs) -> FilterState {
    let mut state = FilterState::new();
    for category in &args.categories {
        state = state.with_category(category.as_str());
    }
    for color in &args.colors {
        state = state.with_color(color.as_str());
    }
    for size in &args.sizes {
        state = state.with_size(size.as_str());
    }
    let flags = [
        (args.new_only, ProductFlag::New),
        (args.best_sellers, ProductFlag::BestSeller),
        (args.trending, ProductFlag::Trending),
    ];
    for (on, flag) in flags {
        if on {
            state = state.with_flag(flag);
        }
    }
    if args.min.is_some() || args.max.is_some() {
        let min = args.min.unwrap_or(state.price.min);
        let max = args.max.unwrap_or(state.price.max);
        state = state.with_price(min, max);
    }
    state
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListingRow<'a> {
    #[serde(flatten)]
    product: &'a Product,
    in_stock: bool,
}

#[derive(Serialize)]
struct Listing<'a> {
    products: Vec<ListingRow<'a>>,
    pagination: shop_commerce::search::Pagination,
    filters: Vec<ActiveFilter>,
    sort: SortKey,
}

fn list(args: ListArgs, catalog: &Catalog, ctx: &Context) -> Result<()> {
    let state = filter_state(&args.filters).with_sort(args.sort);
    let per_page = args.per_page.unwrap_or(ctx.config.catalog.page_size);
    if per_page == 0 {
        bail!("--per-page must be at least 1");
    }

    let listing = apply(catalog.products(), &state);
    let page = Page::of(listing, args.page, per_page);
    let chips = state.active_filters();

    if ctx.output.is_json() {
        ctx.output.json(&Listing {
            products: page
                .items
                .iter()
                .map(|p| ListingRow {
                    product: *p,
                    in_stock: p.is_in_stock(),
                })
                .collect(),
            pagination: page.pagination,
            filters: chips,
            sort: state.sort,
        });
        return Ok(());
    }

    ctx.output.header(&format!("Shop ({})", state.sort.display_name()));
    if !chips.is_empty() {
        let labels: Vec<String> = chips.iter().map(ActiveFilter::label).collect();
        ctx.output.kv("filters", &labels.join(", "));
    }

    if page.is_empty() {
        ctx.output.info("No products match these filters.");
        return Ok(());
    }

    let widths = [4, 36, 12, 10, 20];
    ctx.output.table_row(&["ID", "NAME", "CATEGORY", "PRICE", "RATING"], &widths);
    for product in &page.items {
        let id = product.id.to_string();
        let price = product.base_price.display();
        let rating = format!("{:.1} ({})", product.rating, product.review_count);
        ctx.output
            .table_row(&[&id, &product.name, &product.category, &price, &rating], &widths);
    }

    let p = &page.pagination;
    ctx.output.info(&format!(
        "Showing {}-{} of {} products, page {} of {}",
        p.start_item(),
        p.end_item(),
        p.total,
        p.page,
        p.total_pages.max(1)
    ));
    if p.has_next {
        ctx.output.debug(&format!("Next page: --page {}", p.page + 1));
    }

    Ok(())
}

fn facets(args: &FilterArgs, catalog: &Catalog, ctx: &Context) -> Result<()> {
    let state = filter_state(args);
    let listing = apply(catalog.products(), &state);
    let counts = FacetCounts::compute(listing.iter().copied(), &state);

    if ctx.output.is_json() {
        ctx.output.json(&counts);
        return Ok(());
    }

    print_facet(ctx, "Categories", &counts.categories);
    print_facet(ctx, "Colours", &counts.colors);
    print_facet(ctx, "Sizes", &counts.sizes);
    Ok(())
}

fn print_facet<K: std::fmt::Display>(ctx: &Context, title: &str, values: &[FacetValue<K>]) {
    ctx.output.header(title);
    for value in values {
        let mark = if value.selected {
            style("[x]").green().to_string()
        } else {
            style("[ ]").dim().to_string()
        };
        ctx.output.list_item(&format!("{} {} ({})", mark, value.id, value.count));
    }
}

fn sorts(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&SortKey::ALL);
        return Ok(());
    }
    for key in SortKey::ALL {
        ctx.output.kv(key.as_str(), key.display_name());
    }
    Ok(())
}

/// One-line product summary.
pub fn summary(product: &Product) -> String {
    let price = match product.price_range() {
        Some((low, high)) if low != high => format!("{} - {}", low.display(), high.display()),
        _ => product.base_price.display(),
    };
    format!(
        "#{} {} {} {}",
        product.id,
        style(&product.name).bold(),
        style(price).bold(),
        output::rating(product.rating, product.review_count)
    )
}
