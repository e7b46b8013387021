//! Products

use std::fmt;

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{cart::Variant, tags::StringTagCollection};

/// Stable product identifier, used to match cart lines across catalog re-fetches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new product identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Coarse stock band shown next to a product. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    /// Fewer than 10 units.
    Low,

    /// Fewer than 20 units.
    Medium,

    /// 20 units or more.
    High,
}

impl StockLevel {
    /// Band a raw stock count.
    pub fn from_stock(stock: u32) -> Self {
        match stock {
            0..10 => StockLevel::Low,
            10..20 => StockLevel::Medium,
            _ => StockLevel::High,
        }
    }
}

/// Product
///
/// Read-only from the cart's and the query pipeline's point of view; the
/// catalog source owns its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Long-form description, searched alongside the name
    pub description: String,

    /// Product price
    pub price: Money<'a, Currency>,

    /// Category used for filter grouping
    pub category: String,

    /// Units in stock
    pub stock: u32,

    /// Average rating in `[0, 5]`
    pub rating: Decimal,

    /// Number of reviews behind the rating
    pub reviews: u32,

    /// Image path or URL
    pub image: Option<String>,

    /// Promotional badge, e.g. "Best Seller"
    pub badge: Option<String>,

    /// Product tags
    pub tags: StringTagCollection,

    /// Selectable flavors, in display order
    pub flavors: SmallVec<[String; 4]>,

    /// Selectable sizes, in display order
    pub sizes: SmallVec<[String; 4]>,

    /// Certifications, e.g. "GMP Certified"
    pub certifications: SmallVec<[String; 2]>,

    /// Nutrition facts
    pub nutrition: FxHashMap<String, String>,
}

impl<'a> Product<'a> {
    /// Create a product with the given id, name and price. Everything else is empty.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money<'a, Currency>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            category: String::new(),
            stock: 0,
            rating: Decimal::ZERO,
            reviews: 0,
            image: None,
            badge: None,
            tags: StringTagCollection::empty(),
            flavors: SmallVec::new(),
            sizes: SmallVec::new(),
            certifications: SmallVec::new(),
            nutrition: FxHashMap::default(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the rating.
    #[must_use]
    pub fn with_rating(mut self, rating: Decimal) -> Self {
        self.rating = rating;
        self
    }

    /// Set the stock count.
    #[must_use]
    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    /// Set the selectable flavors.
    #[must_use]
    pub fn with_flavors(mut self, flavors: &[&str]) -> Self {
        self.flavors = flavors.iter().map(|flavor| (*flavor).to_string()).collect();
        self
    }

    /// Set the selectable sizes.
    #[must_use]
    pub fn with_sizes(mut self, sizes: &[&str]) -> Self {
        self.sizes = sizes.iter().map(|size| (*size).to_string()).collect();
        self
    }

    /// Set the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = StringTagCollection::from_strs(tags);
        self
    }

    /// Stock band for display.
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::from_stock(self.stock)
    }

    /// Check whether the product offers the chosen variant.
    ///
    /// An unset axis is always accepted; a set axis must name one of the
    /// product's listed options.
    pub fn offers(&self, variant: &Variant) -> bool {
        let flavor_ok = variant
            .flavor
            .as_ref()
            .is_none_or(|flavor| self.flavors.contains(flavor));

        let size_ok = variant
            .size
            .as_ref()
            .is_none_or(|size| self.sizes.contains(size));

        flavor_ok && size_ok
    }

    /// The variant a shopper gets without choosing: the first flavor and size.
    pub fn default_variant(&self) -> Variant {
        Variant {
            flavor: self.flavors.first().cloned(),
            size: self.sizes.first().cloned(),
        }
    }
}
