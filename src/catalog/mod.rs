//! Catalog
//!
//! The product source, the query pipeline over it and the browsing view that
//! ties the two together.

pub mod query;
pub mod source;
pub mod view;

pub use query::{
    ALL_CATEGORIES, CategoryFilter, DEFAULT_PAGE_SIZE, Page, QueryState, SortKey, UnknownSortKey,
    categories, filter_and_sort, query,
};
pub use source::{Catalog, CatalogError, SubscriptionKey};
pub use view::ShopView;
