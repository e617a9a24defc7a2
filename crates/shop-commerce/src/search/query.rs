//! Sorting and the filter/sort pipeline.

use crate::catalog::Product;
use crate::search::FilterState;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort options for the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Catalog order.
    #[default]
    Featured,
    /// Base price, low to high.
    PriceAsc,
    /// Base price, high to low.
    PriceDesc,
    /// Highest id first.
    Newest,
    /// Highest rated first.
    RatingDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Featured,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::Newest,
        SortKey::RatingDesc,
    ];

    /// Wire name (e.g., "price-asc").
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::Newest => "newest",
            SortKey::RatingDesc => "rating-desc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Featured => "Featured",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::Newest => "Newest",
            SortKey::RatingDesc => "Highest Rated",
        }
    }

    /// Sort in place. `sort_by` is stable, so ties keep their prior order.
    pub fn sort(&self, products: &mut [&Product]) {
        match self {
            SortKey::Featured => {}
            SortKey::PriceAsc => products.sort_by_key(|p| p.base_price.amount),
            SortKey::PriceDesc => products.sort_by(|a, b| b.base_price.amount.cmp(&a.base_price.amount)),
            SortKey::Newest => products.sort_by(|a, b| b.id.cmp(&a.id)),
            SortKey::RatingDesc => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognised sort name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key '{0}' (expected one of: featured, price-asc, price-desc, newest, rating-desc)")]
pub struct ParseSortKeyError(pub String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSortKeyError(s.to_string()))
    }
}

/// Filter then sort a product collection.
///
/// Pure: the input is untouched and the result borrows from it. Featured
/// order is the input order.
pub fn apply<'a>(products: &'a [Product], state: &FilterState) -> Vec<&'a Product> {
    let mut result: Vec<&Product> = products.iter().filter(|p| state.matches(p)).collect();
    state.sort.sort(&mut result);
    tracing::debug!(
        total = products.len(),
        matched = result.len(),
        sort = state.sort.as_str(),
        "applied listing filters"
    );
    result
}
