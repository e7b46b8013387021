//! Catalog Query Pipeline
//!
//! Search, category filter, stable sort and pagination over an in-memory
//! product list, in that order. The pipeline is a pure function: empty results
//! and out-of-range pages are ordinary outputs.

use std::{fmt, str::FromStr};

use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::debug;

use crate::products::Product;

/// Products shown per page by default.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// The category selection that matches every product.
pub const ALL_CATEGORIES: &str = "all";

/// Error returned when parsing an unknown sort key.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown sort key: {0}")]
pub struct UnknownSortKey(String);

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Keep the source order.
    #[default]
    Featured,

    /// Ascending by price.
    PriceLow,

    /// Descending by price.
    PriceHigh,

    /// Descending by rating.
    Rating,
}

impl SortKey {
    /// Canonical name, as accepted by [`SortKey::from_str`].
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Rating => "rating",
        }
    }
}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "default" | "featured" => Ok(SortKey::Featured),
            "price-low" => Ok(SortKey::PriceLow),
            "price-high" => Ok(SortKey::PriceHigh),
            "rating" => Ok(SortKey::Rating),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every category.
    #[default]
    All,

    /// One category, compared case-insensitively.
    Named(String),
}

impl CategoryFilter {
    /// Interpret a selection, treating the `"all"` sentinel specially.
    pub fn from_selection(selection: &str) -> Self {
        if selection == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(selection.to_string())
        }
    }

    /// Check whether a product category passes this filter.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(selected) => selected.to_lowercase() == category.to_lowercase(),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Named(category) => f.write_str(category),
        }
    }
}

/// Client-local query state.
///
/// Changing the search term, category or sort key moves back to page 1;
/// changing the page leaves the other fields alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    search_term: String,
    category: CategoryFilter,
    sort: SortKey,
    page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category: CategoryFilter::All,
            sort: SortKey::Featured,
            page: 1,
        }
    }
}

impl QueryState {
    /// Free-text search term.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Selected category.
    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    /// Selected ordering.
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Current 1-based page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Set the search term, returning to page 1 if it changed.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();

        if term != self.search_term {
            self.search_term = term;
            self.reset_page();
        }
    }

    /// Set the category, returning to page 1 if it changed.
    pub fn set_category(&mut self, category: CategoryFilter) {
        if category != self.category {
            self.category = category;
            self.reset_page();
        }
    }

    /// Set the ordering, returning to page 1 if it changed.
    pub fn set_sort(&mut self, sort: SortKey) {
        if sort != self.sort {
            self.sort = sort;
            self.reset_page();
        }
    }

    /// Move to a page. Page numbers start at 1; 0 is treated as 1.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Return to page 1.
    pub fn reset_page(&mut self) {
        self.page = 1;
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'p, 'a> {
    items: Vec<&'p Product<'a>>,
    number: usize,
    page_size: usize,
    total_matches: usize,
}

impl<'p, 'a> Page<'p, 'a> {
    /// Products on this page, in display order.
    pub fn items(&self) -> &[&'p Product<'a>] {
        &self.items
    }

    /// Iterate over the products on this page.
    pub fn iter(&self) -> impl Iterator<Item = &'p Product<'a>> + '_ {
        self.items.iter().copied()
    }

    /// 1-based page number.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Maximum number of products per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Products matching the filters across all pages.
    pub fn total_matches(&self) -> usize {
        self.total_matches
    }

    /// Number of non-empty pages.
    pub fn total_pages(&self) -> usize {
        self.total_matches.div_ceil(self.page_size)
    }

    /// Check whether a page precedes this one.
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Check whether a non-empty page follows this one.
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages()
    }

    /// Number of products on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the page is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Apply the search and category filters, then sort.
///
/// Sorting is stable: products that compare equal keep their source order.
pub fn filter_and_sort<'p, 'a>(
    products: &'p [Product<'a>],
    state: &QueryState,
) -> Vec<&'p Product<'a>> {
    let term = state.search_term.to_lowercase();

    let mut matches: Vec<&'p Product<'a>> = products
        .iter()
        .filter(|product| matches_search(product, &term))
        .filter(|product| state.category.matches(&product.category))
        .collect();

    match state.sort {
        SortKey::Featured => {}
        SortKey::PriceLow => {
            matches.sort_by_key(|product| product.price.to_minor_units());
        }
        SortKey::PriceHigh => {
            matches.sort_by(|a, b| b.price.to_minor_units().cmp(&a.price.to_minor_units()));
        }
        SortKey::Rating => {
            matches.sort_by(|a, b| b.rating.cmp(&a.rating));
        }
    }

    matches
}

/// Run the full pipeline and return the requested page.
///
/// A `page_size` of zero is treated as one.
pub fn query<'p, 'a>(
    products: &'p [Product<'a>],
    state: &QueryState,
    page_size: usize,
) -> Page<'p, 'a> {
    let page_size = page_size.max(1);
    let number = state.page.max(1);
    let matches = filter_and_sort(products, state);
    let total_matches = matches.len();

    let start = (number - 1).saturating_mul(page_size);
    let items: Vec<&'p Product<'a>> = matches.into_iter().skip(start).take(page_size).collect();

    debug!(
        search = %state.search_term,
        category = %state.category,
        sort = %state.sort,
        page = number,
        total_matches,
        shown = items.len(),
        "derived catalog page"
    );

    Page {
        items,
        number,
        page_size,
        total_matches,
    }
}

/// Filter choices for a product list: `"all"` followed by each distinct
/// category in first-seen order.
pub fn categories(products: &[Product<'_>]) -> Vec<String> {
    let mut seen = FxHashSet::default();
    let mut categories = vec![ALL_CATEGORIES.to_string()];

    for product in products {
        if seen.insert(product.category.as_str()) {
            categories.push(product.category.clone());
        }
    }

    categories
}

fn matches_search(product: &Product<'_>, term: &str) -> bool {
    term.is_empty()
        || product.name.to_lowercase().contains(term)
        || product.description.to_lowercase().contains(term)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::{Money, iso::USD};

    use super::*;

    fn product(name: &str, minor: i64) -> Product<'static> {
        Product::new(name.to_lowercase(), name, Money::from_minor(minor, USD))
    }

    fn names(page: &Page<'_, '_>) -> Vec<String> {
        page.iter().map(|product| product.name.clone()).collect()
    }

    fn abc() -> Vec<Product<'static>> {
        vec![product("A", 3000), product("B", 1000), product("C", 2000)]
    }

    #[test]
    fn price_low_sort_paginates() {
        let products = abc();
        let mut state = QueryState::default();

        state.set_sort(SortKey::PriceLow);

        assert_eq!(names(&query(&products, &state, 2)), vec!["B", "C"]);

        state.set_page(2);
        assert_eq!(names(&query(&products, &state, 2)), vec!["A"]);

        state.set_page(3);
        let page = query(&products, &state, 2);

        assert!(page.is_empty());
        assert_eq!(page.total_matches(), 3);
        assert_eq!(page.total_pages(), 2);
    }

    #[test]
    fn price_high_sort_descends() {
        let products = abc();
        let mut state = QueryState::default();

        state.set_sort(SortKey::PriceHigh);

        assert_eq!(names(&query(&products, &state, 10)), vec!["A", "C", "B"]);
    }

    #[test]
    fn featured_keeps_source_order() {
        let products = abc();

        assert_eq!(
            names(&query(&products, &QueryState::default(), 10)),
            vec!["A", "B", "C"]
        );
    }

    #[test]
    fn rating_sort_is_stable() {
        let products = vec![
            product("A", 100).with_rating(Decimal::new(45, 1)),
            product("B", 100).with_rating(Decimal::new(48, 1)),
            product("C", 100).with_rating(Decimal::new(45, 1)),
            product("D", 100).with_rating(Decimal::new(50, 1)),
        ];
        let mut state = QueryState::default();

        state.set_sort(SortKey::Rating);

        assert_eq!(
            names(&query(&products, &state, 10)),
            vec!["D", "B", "A", "C"]
        );
    }

    #[test]
    fn price_ties_keep_source_order() {
        let products = vec![product("A", 500), product("B", 100), product("C", 500)];
        let mut state = QueryState::default();

        state.set_sort(SortKey::PriceLow);

        assert_eq!(names(&query(&products, &state, 10)), vec!["B", "A", "C"]);
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_description() {
        let products = vec![
            product("Whey Protein Isolate", 5999),
            product("Creatine", 2999).with_description("Pairs well with WHEY shakes"),
            product("Pre-Workout", 3999),
        ];
        let mut state = QueryState::default();

        state.set_search_term("whey");

        assert_eq!(
            names(&query(&products, &state, 10)),
            vec!["Whey Protein Isolate", "Creatine"]
        );
    }

    #[test]
    fn category_filter_is_case_insensitive() {
        let products = vec![
            product("A", 100).with_category("Protein"),
            product("B", 100).with_category("Mass Gainer"),
            product("C", 100).with_category("protein"),
        ];
        let mut state = QueryState::default();

        state.set_category(CategoryFilter::from_selection("PROTEIN"));

        assert_eq!(names(&query(&products, &state, 10)), vec!["A", "C"]);

        state.set_category(CategoryFilter::from_selection("all"));

        assert_eq!(query(&products, &state, 10).len(), 3);
    }

    #[test]
    fn changing_filters_resets_page() {
        let mut state = QueryState::default();

        state.set_page(3);
        state.set_category(CategoryFilter::Named("Protein".to_string()));
        assert_eq!(state.page(), 1);

        state.set_page(3);
        state.set_search_term("whey");
        assert_eq!(state.page(), 1);

        state.set_page(3);
        state.set_sort(SortKey::Rating);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn changing_page_keeps_filters() {
        let mut state = QueryState::default();

        state.set_search_term("whey");
        state.set_sort(SortKey::PriceHigh);
        state.set_page(4);

        assert_eq!(state.search_term(), "whey");
        assert_eq!(state.sort(), SortKey::PriceHigh);
        assert_eq!(state.page(), 4);
    }

    #[test]
    fn unchanged_selection_keeps_page() {
        let mut state = QueryState::default();

        state.set_sort(SortKey::Rating);
        state.set_page(2);
        state.set_sort(SortKey::Rating);

        assert_eq!(state.page(), 2);
    }

    #[test]
    fn page_zero_is_page_one() {
        let mut state = QueryState::default();

        state.set_page(0);

        assert_eq!(state.page(), 1);
    }

    #[test]
    fn page_navigation_flags() {
        let products: Vec<_> = (0..25).map(|i| product(&format!("P{i}"), 100)).collect();
        let mut state = QueryState::default();

        let first = query(&products, &state, DEFAULT_PAGE_SIZE);
        assert!(!first.has_previous());
        assert!(first.has_next());
        assert_eq!(first.total_pages(), 3);

        state.set_page(3);
        let last = query(&products, &state, DEFAULT_PAGE_SIZE);
        assert!(last.has_previous());
        assert!(!last.has_next());
        assert_eq!(last.len(), 5);
    }

    #[test]
    fn empty_catalog_is_not_an_error() {
        let page = query(&[], &QueryState::default(), DEFAULT_PAGE_SIZE);

        assert!(page.is_empty());
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_next());
    }

    #[test]
    fn sort_keys_parse_with_aliases() {
        assert_eq!("default".parse::<SortKey>(), Ok(SortKey::Featured));
        assert_eq!("featured".parse::<SortKey>(), Ok(SortKey::Featured));
        assert_eq!("price-low".parse::<SortKey>(), Ok(SortKey::PriceLow));
        assert_eq!("price-high".parse::<SortKey>(), Ok(SortKey::PriceHigh));
        assert_eq!("rating".parse::<SortKey>(), Ok(SortKey::Rating));
        assert_eq!(
            "cheapest".parse::<SortKey>(),
            Err(UnknownSortKey("cheapest".to_string()))
        );
    }

    #[test]
    fn categories_lists_all_then_first_seen() {
        let products = vec![
            product("A", 100).with_category("Protein"),
            product("B", 100).with_category("Mass Gainer"),
            product("C", 100).with_category("Protein"),
        ];

        assert_eq!(categories(&products), vec!["all", "Protein", "Mass Gainer"]);
    }
}
