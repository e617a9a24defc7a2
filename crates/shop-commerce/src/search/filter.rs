//! Listing filter state.

use crate::catalog::{Product, ProductFlag};
use crate::ids::{CategoryId, ColorId, SizeId};
use crate::money::Money;
use crate::search::SortKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inclusive base-price bounds, in whole display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

impl PriceRange {
    pub const DEFAULT_MIN: i64 = 0;
    pub const DEFAULT_MAX: i64 = 10_000;

    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Whether an amount lies within the bounds. Inverted bounds match nothing.
    pub fn contains(&self, price: &Money) -> bool {
        self.min <= price.amount && price.amount <= self.max
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN, Self::DEFAULT_MAX)
    }
}

/// One "active filter" chip, as shown above a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ActiveFilter {
    Category(CategoryId),
    Color(ColorId),
    Size(SizeId),
    Flag(ProductFlag),
    Price(PriceRange),
}

impl ActiveFilter {
    /// Chip label.
    pub fn label(&self) -> String {
        match self {
            ActiveFilter::Category(id) => format!("category: {}", id),
            ActiveFilter::Color(id) => format!("colour: {}", id),
            ActiveFilter::Size(id) => format!("size: {}", id),
            ActiveFilter::Flag(flag) => format!("only: {}", flag),
            ActiveFilter::Price(range) => format!("price: {}-{}", range.min, range.max),
        }
    }
}

/// Transient listing state: facet selections, price range and sort.
///
/// Each facet set is OR within itself; the predicates AND together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub categories: BTreeSet<CategoryId>,
    pub colors: BTreeSet<ColorId>,
    pub sizes: BTreeSet<SizeId>,
    /// Merchandising flags; a product needs any one of them.
    pub flags: BTreeSet<ProductFlag>,
    pub price: PriceRange,
    pub sort: SortKey,
}

/// Add the value if absent, remove it if present. Returns true if now selected.
fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) -> bool {
    if set.remove(&value) {
        false
    } else {
        set.insert(value);
        true
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, id: impl Into<CategoryId>) -> Self {
        self.categories.insert(id.into());
        self
    }

    pub fn with_color(mut self, id: impl Into<ColorId>) -> Self {
        self.colors.insert(id.into());
        self
    }

    pub fn with_size(mut self, id: impl Into<SizeId>) -> Self {
        self.sizes.insert(id.into());
        self
    }

    pub fn with_flag(mut self, flag: ProductFlag) -> Self {
        self.flags.insert(flag);
        self
    }

    pub fn with_price(mut self, min: i64, max: i64) -> Self {
        self.price = PriceRange::new(min, max);
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn toggle_category(&mut self, id: impl Into<CategoryId>) -> bool {
        toggle(&mut self.categories, id.into())
    }

    pub fn toggle_color(&mut self, id: impl Into<ColorId>) -> bool {
        toggle(&mut self.colors, id.into())
    }

    pub fn toggle_size(&mut self, id: impl Into<SizeId>) -> bool {
        toggle(&mut self.sizes, id.into())
    }

    pub fn toggle_flag(&mut self, flag: ProductFlag) -> bool {
        toggle(&mut self.flags, flag)
    }

    pub fn reset_price_range(&mut self) {
        self.price = PriceRange::default();
    }

    /// Back to defaults, including the featured sort.
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// Whether anything narrows the listing. Sort order does not count.
    pub fn has_active_filters(&self) -> bool {
        !self.categories.is_empty()
            || !self.colors.is_empty()
            || !self.sizes.is_empty()
            || !self.flags.is_empty()
            || !self.price.is_default()
    }

    /// Active filter chips in category, colour, size, flag, price order.
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut chips: Vec<ActiveFilter> = self
            .categories
            .iter()
            .cloned()
            .map(ActiveFilter::Category)
            .chain(self.colors.iter().cloned().map(ActiveFilter::Color))
            .chain(self.sizes.iter().cloned().map(ActiveFilter::Size))
            .chain(self.flags.iter().copied().map(ActiveFilter::Flag))
            .collect();
        if !self.price.is_default() {
            chips.push(ActiveFilter::Price(self.price));
        }
        chips
    }

    /// Remove the selection a chip stands for.
    pub fn remove(&mut self, chip: &ActiveFilter) {
        match chip {
            ActiveFilter::Category(id) => {
                self.categories.remove(id);
            }
            ActiveFilter::Color(id) => {
                self.colors.remove(id);
            }
            ActiveFilter::Size(id) => {
                self.sizes.remove(id);
            }
            ActiveFilter::Flag(flag) => {
                self.flags.remove(flag);
            }
            ActiveFilter::Price(_) => self.reset_price_range(),
        }
    }

    pub fn matches_category(&self, product: &Product) -> bool {
        self.categories.is_empty() || self.categories.contains(&product.category_id())
    }

    pub fn matches_color(&self, product: &Product) -> bool {
        self.colors.is_empty()
            || product
                .variants
                .iter()
                .any(|v| self.colors.iter().any(|c| v.matches_color(c)))
    }

    /// Only sizes with stock count.
    pub fn matches_size(&self, product: &Product) -> bool {
        self.sizes.is_empty()
            || product
                .variants
                .iter()
                .any(|v| self.sizes.iter().any(|s| v.has_size_in_stock(s)))
    }

    pub fn matches_flag(&self, product: &Product) -> bool {
        self.flags.is_empty() || self.flags.iter().any(|f| product.has_flag(*f))
    }

    pub fn matches_price(&self, product: &Product) -> bool {
        self.price.contains(&product.base_price)
    }

    /// Whether a product passes every predicate.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_category(product)
            && self.matches_color(product)
            && self.matches_size(product)
            && self.matches_flag(product)
            && self.matches_price(product)
    }
}
