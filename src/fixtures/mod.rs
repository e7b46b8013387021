//! Fixtures
//!
//! YAML product sets, e.g. the bundled static catalog, loaded from
//! `<base>/products/<name>.yml`.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashSet;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{Catalog, CatalogError},
    products::Product,
};

pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Rating outside `[0, 5]`
    #[error("Invalid rating: {0}")]
    InvalidRating(f64),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Two products share an id
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// Catalog construction error
    #[error("Failed to create catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Catalog Fixture
#[derive(Debug)]
pub struct CatalogFixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Loaded products, in file order
    products: Vec<Product<'a>>,

    /// Ids seen so far
    ids: FxHashSet<String>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl Default for CatalogFixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CatalogFixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: Vec::new(),
            ids: FxHashSet::default(),
            currency: None,
        }
    }

    /// Load products from a YAML fixture file, appending to any already loaded.
    ///
    /// The file is applied all or nothing: on error the fixture is unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a product is
    /// invalid, if ids repeat, or if currencies differ between products.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: products::ProductsFixture = serde_norway::from_str(&contents)?;

        let mut ids = FxHashSet::default();
        let mut loaded = Vec::with_capacity(fixture.products.len());
        let mut currency = self.currency;

        for product_fixture in fixture.products {
            if self.ids.contains(&product_fixture.id) || !ids.insert(product_fixture.id.clone()) {
                return Err(FixtureError::DuplicateProduct(product_fixture.id));
            }

            let (product, product_currency) = product_fixture.into_product()?;

            match currency {
                Some(expected) if expected != product_currency => {
                    return Err(FixtureError::CurrencyMismatch(
                        expected.iso_alpha_code.to_string(),
                        product_currency.iso_alpha_code.to_string(),
                    ));
                }
                Some(_) => {}
                None => currency = Some(product_currency),
            }

            loaded.push(product);
        }

        // Nothing is kept unless the whole file validated.
        self.ids.extend(ids);
        self.products.extend(loaded);
        self.currency = currency;

        debug!(fixture = name, products = self.products.len(), "loaded product fixture");

        Ok(self)
    }

    /// Load a named product set from the default base path.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture file cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::load("./fixtures", name)
    }

    /// Load a named product set from `base_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture file cannot be loaded.
    pub fn load(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture.load_products(name)?;

        Ok(fixture)
    }

    /// Loaded products, in file order.
    pub fn products(&self) -> &[Product<'a>] {
        &self.products
    }

    /// Currency of the loaded products.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCurrency`] if nothing has been loaded.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    /// Build a catalog whose static products are the loaded fixture.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCurrency`] if nothing has been loaded.
    pub fn catalog(self) -> Result<Catalog<'a>, FixtureError> {
        let currency = self.currency()?;

        Ok(Catalog::with_static(currency, self.products)?)
    }
}
