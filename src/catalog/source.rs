//! Catalog Source
//!
//! Holds the product list the storefront shows and tells subscribers whenever
//! it changes. The visible list is the latest live snapshot followed by the
//! bundled static products. If the live feed fails, the static products are
//! still shown.

use std::fmt;

use rusty_money::iso::Currency;
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::products::{Product, ProductId};

new_key_type! {
    /// Handle returned by [`Catalog::subscribe`]
    pub struct SubscriptionKey;
}

/// Errors raised when accepting products into the catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A product is priced in a currency other than the catalog's (product id, product currency, catalog currency).
    #[error("Product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),
}

type Listener<'a> = Box<dyn FnMut(&[Product<'a>]) + 'a>;

/// Catalog
pub struct Catalog<'a> {
    currency: &'static Currency,
    static_products: Vec<Product<'a>>,
    live_products: Vec<Product<'a>>,
    products: Vec<Product<'a>>,
    last_error: Option<String>,
    listeners: SlotMap<SubscriptionKey, Listener<'a>>,
}

impl fmt::Debug for Catalog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("currency", &self.currency.iso_alpha_code)
            .field("static_products", &self.static_products.len())
            .field("live_products", &self.live_products.len())
            .field("last_error", &self.last_error)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog priced in `currency`.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            currency,
            static_products: Vec::new(),
            live_products: Vec::new(),
            products: Vec::new(),
            last_error: None,
            listeners: SlotMap::with_key(),
        }
    }

    /// Create a catalog backed by a bundled static product list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::CurrencyMismatch`] if a product is not priced in `currency`.
    pub fn with_static(
        currency: &'static Currency,
        products: Vec<Product<'a>>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new(currency);

        catalog.check_currency(&products)?;
        catalog.static_products = products;
        catalog.rebuild();

        Ok(catalog)
    }

    /// The visible product list: live products first, then static ones.
    pub fn products(&self) -> &[Product<'a>] {
        &self.products
    }

    /// Find a visible product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product<'a>> {
        self.products.iter().find(|product| product.id == *id)
    }

    /// Currency every product is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// The reason the last live snapshot failed, if the feed is currently degraded.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Accept a new live snapshot and notify subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::CurrencyMismatch`] if a product is not priced in
    /// the catalog currency. The previous snapshot stays in place.
    pub fn publish(&mut self, products: Vec<Product<'a>>) -> Result<(), CatalogError> {
        self.check_currency(&products)?;

        info!(live = products.len(), "accepted catalog snapshot");

        self.live_products = products;
        self.last_error = None;
        self.rebuild();
        self.notify();

        Ok(())
    }

    /// Record a failed live snapshot: fall back to the static products and
    /// notify subscribers.
    pub fn publish_error(&mut self, reason: impl Into<String>) {
        let reason = reason.into();

        warn!(%reason, "catalog snapshot failed, showing static products");

        self.live_products.clear();
        self.last_error = Some(reason);
        self.rebuild();
        self.notify();
    }

    /// Add a live product, or replace the live product with the same id, and
    /// notify subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::CurrencyMismatch`] if the product is not priced
    /// in the catalog currency. The catalog is left unchanged.
    pub fn upsert_product(&mut self, product: Product<'a>) -> Result<(), CatalogError> {
        self.check_currency(std::slice::from_ref(&product))?;

        match self
            .live_products
            .iter_mut()
            .find(|existing| existing.id == product.id)
        {
            Some(existing) => {
                info!(id = %product.id, "updated live product");

                *existing = product;
            }
            None => {
                info!(id = %product.id, "added live product");

                self.live_products.push(product);
            }
        }

        self.rebuild();
        self.notify();

        Ok(())
    }

    /// Delete a live product and notify subscribers. Static products cannot be
    /// removed. Returns `false` if no live product has this id.
    pub fn remove_product(&mut self, id: &ProductId) -> bool {
        let before = self.live_products.len();

        self.live_products.retain(|product| product.id != *id);

        if self.live_products.len() == before {
            return false;
        }

        info!(%id, "removed live product");

        self.rebuild();
        self.notify();

        true
    }

    /// Register a change listener.
    ///
    /// The listener is called once straight away with the current products,
    /// then again after every change to the visible products.
    pub fn subscribe(&mut self, mut listener: impl FnMut(&[Product<'a>]) + 'a) -> SubscriptionKey {
        listener(&self.products);

        let key = self.listeners.insert(Box::new(listener));

        debug!(?key, "catalog subscriber added");

        key
    }

    /// Remove a listener. Returns `false` if the key was unknown.
    pub fn unsubscribe(&mut self, key: SubscriptionKey) -> bool {
        let removed = self.listeners.remove(key).is_some();

        if removed {
            debug!(?key, "catalog subscriber removed");
        }

        removed
    }

    fn check_currency(&self, products: &[Product<'a>]) -> Result<(), CatalogError> {
        products.iter().try_for_each(|product| {
            let product_currency = product.price.currency();

            if product_currency == self.currency {
                Ok(())
            } else {
                Err(CatalogError::CurrencyMismatch(
                    product.id.clone(),
                    product_currency.iso_alpha_code,
                    self.currency.iso_alpha_code,
                ))
            }
        })
    }

    fn rebuild(&mut self) {
        self.products = self
            .live_products
            .iter()
            .chain(self.static_products.iter())
            .cloned()
            .collect();
    }

    fn notify(&mut self) {
        for listener in self.listeners.values_mut() {
            listener(&self.products);
        }
    }
}
