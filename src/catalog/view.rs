//! Shop View
//!
//! The browsing state behind the shop page: the latest product list from the
//! catalog plus the shopper's query. Every catalog notification replaces the
//! list wholesale and moves back to the first page.

use crate::{
    catalog::query::{self, DEFAULT_PAGE_SIZE, Page, QueryState},
    products::Product,
};

/// Shop View
#[derive(Debug, Clone)]
pub struct ShopView<'a> {
    products: Vec<Product<'a>>,
    state: QueryState,
    page_size: usize,
}

impl Default for ShopView<'_> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<'a> ShopView<'a> {
    /// Create an empty view showing `page_size` products per page.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            products: Vec::new(),
            state: QueryState::default(),
            page_size: page_size.max(1),
        }
    }

    /// Replace the product list after a catalog change and return to page 1.
    pub fn on_catalog_change(&mut self, products: &[Product<'a>]) {
        self.products = products.to_vec();
        self.state.reset_page();
    }

    /// The shopper's current query.
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Mutable access to the query. The setters on [`QueryState`] take care of
    /// the page reset rules.
    pub fn state_mut(&mut self) -> &mut QueryState {
        &mut self.state
    }

    /// Products shown per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// All products currently known to the view.
    pub fn products(&self) -> &[Product<'a>] {
        &self.products
    }

    /// Derive the visible page.
    pub fn page(&self) -> Page<'_, 'a> {
        query::query(&self.products, &self.state, self.page_size)
    }

    /// Category choices for the filter bar.
    pub fn categories(&self) -> Vec<String> {
        query::categories(&self.products)
    }
}
