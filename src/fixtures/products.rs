//! Product Fixtures

use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError, money::currency_from_code, products::Product,
    tags::StringTagCollection,
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Products in catalog order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product identifier
    pub id: String,

    /// Product name
    pub name: String,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Product price (e.g., "59.99 USD")
    pub price: String,

    /// Product category
    pub category: String,

    /// Image path
    #[serde(default)]
    pub image: Option<String>,

    /// Units in stock
    #[serde(default)]
    pub stock: u32,

    /// Rating in `[0, 5]`
    #[serde(default)]
    pub rating: f64,

    /// Review count
    #[serde(default)]
    pub reviews: u32,

    /// Promotional badge
    #[serde(default)]
    pub badge: Option<String>,

    /// Product tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Nutrition facts
    #[serde(default)]
    pub nutrition: FxHashMap<String, String>,

    /// Selectable flavors
    #[serde(default)]
    pub flavors: Vec<String>,

    /// Selectable sizes
    #[serde(default)]
    pub sizes: Vec<String>,

    /// Certifications
    #[serde(default)]
    pub certifications: Vec<String>,
}

impl ProductFixture {
    /// Build the product, also returning the currency its price is quoted in.
    ///
    /// # Errors
    ///
    /// Returns an error if the price or rating is invalid.
    pub fn into_product<'a>(self) -> Result<(Product<'a>, &'static Currency), FixtureError> {
        let (minor_units, currency) = parse_price(&self.price)?;
        let rating = parse_rating(self.rating)?;

        let tag_refs: Vec<&str> = self.tags.iter().map(String::as_str).collect();

        let product = Product {
            id: self.id.into(),
            name: self.name,
            description: self.description,
            price: Money::from_minor(minor_units, currency),
            category: self.category,
            stock: self.stock,
            rating,
            reviews: self.reviews,
            image: self.image,
            badge: self.badge,
            tags: StringTagCollection::from_strs(&tag_refs),
            flavors: self.flavors.into_iter().collect(),
            sizes: self.sizes.into_iter().collect(),
            certifications: self.certifications.into_iter().collect(),
            nutrition: self.nutrition,
        };

        Ok((product, currency))
    }
}

impl TryFrom<ProductFixture> for Product<'_> {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        fixture.into_product().map(|(product, _currency)| product)
    }
}

/// Parse price string (e.g., "59.99 USD") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a non-negative decimal with at most as many decimal
/// places as the currency's minor unit, or if the currency code is not
/// recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = currency_from_code(currency_code)
        .ok_or_else(|| FixtureError::UnknownCurrency((*currency_code).to_string()))?;

    // More decimals than the currency's minor unit cannot be represented exactly.
    if amount.normalize().scale() > currency.exponent {
        return Err(FixtureError::InvalidPrice(format!(
            "{s} has more than {} decimal places",
            currency.exponent
        )));
    }

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}

/// Convert a YAML rating into a two-place decimal in `[0, 5]`.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidRating`] if the value is not finite or out of range.
pub fn parse_rating(value: f64) -> Result<Decimal, FixtureError> {
    let rating = Decimal::from_f64(value)
        .map(|rating| rating.round_dp(2))
        .ok_or(FixtureError::InvalidRating(value))?;

    if rating < Decimal::ZERO || rating > Decimal::new(5, 0) {
        return Err(FixtureError::InvalidRating(value));
    }

    Ok(rating)
}
