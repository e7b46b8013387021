//! Cart requests given on the command line

use std::str::FromStr;

use storefront::{cart::Variant, products::ProductId};
use thiserror::Error;

/// Errors parsing an `ID[:FLAVOR[:SIZE]][*QTY]` item.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// The item has no product id.
    #[error("Missing product id in {0:?}")]
    MissingProduct(String),

    /// The quantity suffix is not a number in range.
    #[error("Invalid quantity in {0:?}")]
    InvalidQuantity(String),

    /// More than three `:`-separated fields.
    #[error("Too many fields in {0:?}; expected ID[:FLAVOR[:SIZE]][*QTY]")]
    TooManyFields(String),
}

/// One `--add` item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRequest {
    /// Product to add
    pub product_id: ProductId,

    /// Chosen flavor and size
    pub variant: Variant,

    /// Units to add
    pub quantity: u32,
}

impl FromStr for CartRequest {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (item, quantity) = split_quantity(s)?;

        let mut fields = item.split(':').map(str::trim);

        let product_id = fields
            .next()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| RequestError::MissingProduct(s.to_string()))?;

        let flavor = fields.next().filter(|flavor| !flavor.is_empty());
        let size = fields.next().filter(|size| !size.is_empty());

        if fields.next().is_some() {
            return Err(RequestError::TooManyFields(s.to_string()));
        }

        Ok(CartRequest {
            product_id: ProductId::from(product_id),
            variant: Variant::new(flavor, size),
            quantity,
        })
    }
}

/// Split a trailing `*QTY` off the item.
fn split_quantity(s: &str) -> Result<(&str, u32), RequestError> {
    match s.rsplit_once('*') {
        Some((item, digits)) => {
            let quantity = digits
                .trim()
                .parse()
                .map_err(|_err| RequestError::InvalidQuantity(s.to_string()))?;

            Ok((item, quantity))
        }
        None => Ok((s, 1)),
    }
}
