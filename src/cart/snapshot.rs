//! Cart Snapshots
//!
//! A serializable image of a cart, for callers that choose to persist it
//! across sessions. The layout is `(product, variant) -> (quantity, unit price)`
//! plus the cart currency.

use rusty_money::Money;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::{Cart, LineItem, Variant},
    money::currency_from_code,
    products::ProductId,
};

/// Errors raised while restoring or serializing a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot names a currency this crate does not support.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A line carries a negative unit price.
    #[error("Line for product {0} has a negative unit price")]
    NegativePrice(ProductId),

    /// YAML (de)serialization failure.
    #[error("Failed to process YAML: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Serializable cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// ISO alpha code of the cart currency
    pub currency: String,

    /// Lines in insertion order
    #[serde(default)]
    pub lines: Vec<LineSnapshot>,
}

/// Serializable cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSnapshot {
    /// Product identifier
    pub product_id: ProductId,

    /// Product name at the time the line was created
    #[serde(default)]
    pub name: String,

    /// Chosen variant
    #[serde(default)]
    pub variant: Variant,

    /// Number of units
    pub quantity: u32,

    /// Unit price in minor units of the snapshot currency
    pub unit_price: i64,
}

impl CartSnapshot {
    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Yaml`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String, SnapshotError> {
        Ok(serde_norway::to_string(self)?)
    }

    /// Parse from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Yaml`] if the document is malformed.
    pub fn from_yaml(yaml: &str) -> Result<Self, SnapshotError> {
        Ok(serde_norway::from_str(yaml)?)
    }
}

impl Cart<'_> {
    /// Capture the cart as a serializable snapshot.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            currency: self.currency().iso_alpha_code.to_string(),
            lines: self
                .lines()
                .map(|line| LineSnapshot {
                    product_id: line.product_id.clone(),
                    name: line.name.clone(),
                    variant: line.variant.clone(),
                    quantity: line.quantity,
                    unit_price: line.unit_price.to_minor_units(),
                })
                .collect(),
        }
    }
}

impl Cart<'static> {
    /// Rebuild a cart from a snapshot.
    ///
    /// Zero-quantity lines are dropped and repeated `(product, variant)` keys are
    /// merged (keeping the first unit price), so the restored cart satisfies the
    /// same invariants as one built through [`Cart::add_item`].
    ///
    /// # Errors
    ///
    /// - [`SnapshotError::UnknownCurrency`]: the snapshot currency is not supported.
    /// - [`SnapshotError::NegativePrice`]: a line has a negative unit price.
    pub fn restore(snapshot: CartSnapshot) -> Result<Self, SnapshotError> {
        let currency = currency_from_code(&snapshot.currency)
            .ok_or_else(|| SnapshotError::UnknownCurrency(snapshot.currency.clone()))?;

        let mut cart = Cart::new(currency);

        for line in snapshot.lines {
            if line.unit_price < 0 {
                return Err(SnapshotError::NegativePrice(line.product_id));
            }

            if line.quantity == 0 {
                continue;
            }

            if let Some(existing) = cart
                .lines
                .iter_mut()
                .find(|existing| existing.matches(&line.product_id, &line.variant))
            {
                existing.quantity = existing.quantity.saturating_add(line.quantity);

                continue;
            }

            cart.lines.push(LineItem {
                product_id: line.product_id,
                name: line.name,
                variant: line.variant,
                quantity: line.quantity,
                unit_price: Money::from_minor(line.unit_price, currency),
            });
        }

        Ok(cart)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use crate::products::Product;

    use super::*;

    #[test]
    fn snapshot_restores_equivalent_cart() -> TestResult {
        let whey = Product::new("whey", "Whey", Money::from_minor(5999, GBP));
        let mut cart = Cart::new(GBP);

        cart.add_item(&whey, Variant::new(Some("Vanilla"), Some("5lb")), 2);
        cart.add_item(&whey, Variant::flavor("Chocolate"), 1);

        let yaml = cart.snapshot().to_yaml()?;
        let restored = Cart::restore(CartSnapshot::from_yaml(&yaml)?)?;

        assert_eq!(restored.len(), 2);
        assert_eq!(restored.total(), cart.total());
        assert_eq!(restored.currency(), GBP);
        assert_eq!(restored.snapshot(), cart.snapshot());

        Ok(())
    }

    #[test]
    fn restore_merges_duplicates_and_drops_empty_lines() -> TestResult {
        let yaml = r"
currency: USD
lines:
  - product_id: a
    quantity: 2
    unit_price: 1999
  - product_id: a
    quantity: 3
    unit_price: 1999
  - product_id: b
    variant:
      flavor: Vanilla
    quantity: 0
    unit_price: 500
";

        let cart = Cart::restore(CartSnapshot::from_yaml(yaml)?)?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 5);

        Ok(())
    }

    #[test]
    fn restore_rejects_unknown_currency() {
        let snapshot = CartSnapshot {
            currency: "XYZ".to_string(),
            lines: Vec::new(),
        };

        assert!(matches!(
            Cart::restore(snapshot),
            Err(SnapshotError::UnknownCurrency(code)) if code == "XYZ"
        ));
    }

    #[test]
    fn restore_rejects_negative_prices() {
        let snapshot = CartSnapshot {
            currency: "USD".to_string(),
            lines: vec![LineSnapshot {
                product_id: ProductId::from("a"),
                name: String::new(),
                variant: Variant::default(),
                quantity: 1,
                unit_price: -1,
            }],
        };

        assert!(matches!(
            Cart::restore(snapshot),
            Err(SnapshotError::NegativePrice(_))
        ));
    }
}
