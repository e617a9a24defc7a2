//! Search module.
//!
//! Contains the listing filter state, sort keys, pagination and facet counts.

mod filter;
mod query;
mod results;

pub use filter::{ActiveFilter, FilterState, PriceRange};
pub use query::{apply, ParseSortKeyError, SortKey};
pub use results::{FacetCounts, FacetValue, Page, Pagination};
