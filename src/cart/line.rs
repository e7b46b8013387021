//! Cart line items

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::{money, products::ProductId};

/// The shopper's selection along a product's variant axes.
///
/// Two additions of the same product merge only when their variants are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
    /// Chosen flavor, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor: Option<String>,

    /// Chosen size, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl Variant {
    /// Create a variant from optional flavor and size.
    pub fn new(flavor: Option<&str>, size: Option<&str>) -> Self {
        Self {
            flavor: flavor.map(ToString::to_string),
            size: size.map(ToString::to_string),
        }
    }

    /// A flavor-only variant.
    pub fn flavor(flavor: &str) -> Self {
        Self::new(Some(flavor), None)
    }

    /// A size-only variant.
    pub fn size(size: &str) -> Self {
        Self::new(None, Some(size))
    }

    /// Check whether no axis is chosen.
    pub fn is_unset(&self) -> bool {
        self.flavor.is_none() && self.size.is_none()
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.flavor, &self.size) {
            (Some(flavor), Some(size)) => write!(f, "{flavor} / {size}"),
            (Some(only), None) | (None, Some(only)) => f.write_str(only),
            (None, None) => f.write_str("-"),
        }
    }
}

/// One line of the cart: a product in a chosen variant, with a quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem<'a> {
    pub(crate) product_id: ProductId,
    pub(crate) name: String,
    pub(crate) variant: Variant,
    pub(crate) quantity: u32,
    pub(crate) unit_price: Money<'a, Currency>,
}

impl<'a> LineItem<'a> {
    /// The product this line refers to.
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Product name captured when the line was created.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The chosen variant.
    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    /// Number of units on this line. Always positive.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price captured when the line was created.
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// `unit_price * quantity`.
    pub fn line_total(&self) -> Money<'a, Currency> {
        money::extend(&self.unit_price, self.quantity)
    }

    pub(crate) fn matches(&self, product_id: &ProductId, variant: &Variant) -> bool {
        self.product_id == *product_id && self.variant == *variant
    }
}
