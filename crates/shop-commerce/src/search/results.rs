//! Listing pages and facet counts.

use crate::catalog::Product;
use crate::ids::{CategoryId, ColorId, SizeId};
use crate::search::FilterState;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of items.
    pub total: usize,
    /// Total number of pages, at least 1.
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info. Page and page size are clamped to at least 1.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total.div_ceil(per_page).max(1);
        let page = page.max(1);

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.per_page
    }

    /// Get start item number (1-indexed), 0 when the page is empty.
    pub fn start_item(&self) -> usize {
        if self.offset() >= self.total {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        (self.page * self.per_page).min(self.total)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 12, 0)
    }
}

/// One page of a listing.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Slice a full result list down to one page.
    pub fn of(all: Vec<T>, page: usize, per_page: usize) -> Self {
        let pagination = Pagination::new(page, per_page, all.len());
        let items = all
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.per_page)
            .collect();
        Self { items, pagination }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// A facet value with the number of matching products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FacetValue<K> {
    pub id: K,
    pub count: usize,
    /// Whether the value is currently selected.
    pub selected: bool,
}

/// Per-facet product counts over a result set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FacetCounts {
    pub categories: Vec<FacetValue<CategoryId>>,
    pub colors: Vec<FacetValue<ColorId>>,
    pub sizes: Vec<FacetValue<SizeId>>,
}

fn to_values<K: Ord + Clone>(
    counts: BTreeMap<K, usize>,
    selected: &BTreeSet<K>,
) -> Vec<FacetValue<K>> {
    counts
        .into_iter()
        .map(|(id, count)| FacetValue {
            selected: selected.contains(&id),
            id,
            count,
        })
        .collect()
}

impl FacetCounts {
    /// Count how many products carry each facet value.
    ///
    /// A product counts once per value however many variants carry it.
    /// Sizes count only when in stock, as the size filter does.
    pub fn compute<'a>(products: impl IntoIterator<Item = &'a Product>, state: &FilterState) -> Self {
        let mut categories = BTreeMap::new();
        let mut colors = BTreeMap::new();
        let mut sizes = BTreeMap::new();

        for product in products {
            *categories.entry(product.category_id()).or_insert(0) += 1;

            let product_colors: BTreeSet<ColorId> =
                product.variants.iter().map(|v| v.color_id()).collect();
            for color in product_colors {
                *colors.entry(color).or_insert(0) += 1;
            }

            let product_sizes: BTreeSet<SizeId> = product
                .variants
                .iter()
                .flat_map(|v| v.sizes.iter().filter(|s| s.is_available()).map(|s| s.id()))
                .collect();
            for size in product_sizes {
                *sizes.entry(size).or_insert(0) += 1;
            }
        }

        Self {
            categories: to_values(categories, &state.categories),
            colors: to_values(colors, &state.colors),
            sizes: to_values(sizes, &state.sizes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Variant;
    use crate::money::Money;

    #[test]
    fn test_pagination() {
        let p = Pagination::new(2, 5, 12);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.offset(), 5);
        assert_eq!(p.start_item(), 6);
        assert_eq!(p.end_item(), 10);
        assert!(p.has_next && p.has_prev);

        let empty = Pagination::new(1, 12, 0);
        assert_eq!(empty.total_pages, 1);
        assert_eq!(empty.start_item(), 0);
        assert!(!empty.has_next);
    }

    #[test]
    fn test_page_slicing() {
        let page = Page::of((1..=7).collect::<Vec<_>>(), 2, 3);
        assert_eq!(page.items, vec![4, 5, 6]);
        let last = Page::of((1..=7).collect::<Vec<_>>(), 3, 3);
        assert_eq!(last.items, vec![7]);
        let past = Page::of((1..=7).collect::<Vec<_>>(), 9, 3);
        assert!(past.is_empty());
    }

    #[test]
    fn test_facet_counts() {
        let products = vec![
            Product::new(1, "A", Money::inr(100), "Shirts").with_variant(
                Variant::new("Black", "#000000")
                    .with_size("M", Money::inr(100), 2)
                    .with_size("L", Money::inr(100), 0),
            ),
            Product::new(2, "B", Money::inr(100), "Shirts")
                .with_variant(Variant::new("Black", "#000000").with_size("M", Money::inr(100), 1))
                .with_variant(Variant::new("White", "#FFFFFF").with_size("M", Money::inr(100), 1)),
        ];
        let state = FilterState::new().with_color("white");
        let facets = FacetCounts::compute(&products, &state);

        assert_eq!(facets.categories[0].count, 2);
        let black = facets.colors.iter().find(|c| c.id.as_str() == "black").unwrap();
        assert_eq!(black.count, 2);
        assert!(!black.selected);
        assert!(facets.colors.iter().any(|c| c.id.as_str() == "white" && c.selected));
        assert_eq!(facets.sizes.len(), 1);
        assert_eq!(facets.sizes[0].count, 2);
    }
}
