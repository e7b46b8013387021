//! Cart
//!
//! The in-session cart: a mapping keyed by `(product, variant)` whose entries
//! keep insertion order for display. Every operation here is total. Validation
//! of products, currencies and variants belongs to the caller (see
//! [`crate::storefront::Storefront::add_to_cart`]).
//!
//! The cart is plain owned data and is `Send`; a multi-threaded host must put it
//! behind a `Mutex` so that mutations are serialized.

use rusty_money::{Money, iso::Currency};
use tracing::debug;

use crate::{money, products::Product, products::ProductId};

mod line;
pub mod snapshot;

pub use line::{LineItem, Variant};

/// Cart
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    lines: Vec<LineItem<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create an empty cart priced in `currency`.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add `quantity` units of `product` in `variant`.
    ///
    /// Merges into an existing line for the same product and variant, otherwise
    /// appends a new line that snapshots the product's current price. Stock is
    /// not consulted. Adding zero units never creates a line.
    pub fn add_item(&mut self, product: &Product<'a>, variant: Variant, quantity: u32) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(&product.id, &variant))
        {
            line.quantity = line.quantity.saturating_add(quantity);

            debug!(
                product = %product.id,
                variant = %variant,
                quantity = line.quantity,
                "merged cart line"
            );

            return;
        }

        if quantity == 0 {
            return;
        }

        debug!(product = %product.id, variant = %variant, quantity, "added cart line");

        self.lines.push(LineItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            variant,
            quantity,
            unit_price: product.price,
        });
    }

    /// Replace the quantity of a line. A quantity of zero removes the line;
    /// updating a line that does not exist does nothing.
    pub fn update_quantity(&mut self, product_id: &ProductId, variant: &Variant, quantity: u32) {
        if quantity == 0 {
            self.remove_item(product_id, variant);

            return;
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(product_id, variant))
        {
            line.quantity = quantity;

            debug!(product = %product_id, variant = %variant, quantity, "updated cart line");
        }
    }

    /// Remove a line if present.
    pub fn remove_item(&mut self, product_id: &ProductId, variant: &Variant) {
        if let Some(position) = self
            .lines
            .iter()
            .position(|line| line.matches(product_id, variant))
        {
            self.lines.remove(position);

            debug!(product = %product_id, variant = %variant, "removed cart line");
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        debug!(lines = self.lines.len(), "cleared cart");

        self.lines.clear();
    }

    /// Sum of `unit_price * quantity` over every line.
    pub fn total(&self) -> Money<'a, Currency> {
        money::sum_minor(
            self.lines
                .iter()
                .map(|line| line.line_total().to_minor_units()),
            self.currency,
        )
    }

    /// Total number of units across all lines (not the number of lines).
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Look up a single line.
    pub fn get(&self, product_id: &ProductId, variant: &Variant) -> Option<&LineItem<'a>> {
        self.lines
            .iter()
            .find(|line| line.matches(product_id, variant))
    }

    /// Iterate over the lines in insertion order.
    pub fn lines(&self) -> impl Iterator<Item = &LineItem<'a>> {
        self.lines.iter()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Currency every line is priced in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
