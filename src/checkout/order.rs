//! Orders

use std::fmt;

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};

use crate::{
    auth::AuthState,
    cart::{LineItem, Variant},
    checkout::CheckoutError,
    products::ProductId,
};

/// Where an order ships to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingDetails {
    /// Recipient name
    pub full_name: String,

    /// Contact phone number
    pub phone_number: String,

    /// Delivery address
    pub address: String,
}

impl ShippingDetails {
    /// Create shipping details from raw form input.
    pub fn new(
        full_name: impl Into<String>,
        phone_number: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            phone_number: phone_number.into(),
            address: address.into(),
        }
    }

    /// Trim every field and require each to be non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingField`] naming the first blank field.
    pub fn validated(self) -> Result<Self, CheckoutError> {
        Ok(Self {
            full_name: required("full_name", &self.full_name)?,
            phone_number: required("phone_number", &self.phone_number)?,
            address: required("address", &self.address)?,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, CheckoutError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(CheckoutError::MissingField(field));
    }

    Ok(trimmed.to_string())
}

/// Who placed an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Customer {
    /// Nobody was signed in.
    Guest,

    /// A signed-in account.
    Account {
        /// Account user id
        uid: String,

        /// Account email, if known
        email: Option<String>,
    },
}

impl Customer {
    /// Derive the customer from the auth state. Unresolved identities order as guests.
    pub fn from_auth(auth: &AuthState) -> Self {
        match auth.identity() {
            Some(identity) => Customer::Account {
                uid: identity.uid.clone(),
                email: identity.email.clone(),
            },
            None => Customer::Guest,
        }
    }

    /// Account user id, or `None` for a guest.
    pub fn uid(&self) -> Option<&str> {
        match self {
            Customer::Guest => None,
            Customer::Account { uid, .. } => Some(uid),
        }
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Customer::Guest => f.write_str("guest"),
            Customer::Account {
                email: Some(email), ..
            } => f.write_str(email),
            Customer::Account { uid, email: None } => f.write_str(uid),
        }
    }
}

/// Fulfilment status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderStatus {
    /// Received, not yet processed.
    #[default]
    Pending,

    /// Sent to the customer.
    Shipped,

    /// Delivered.
    Delivered,

    /// Cancelled before shipping.
    Cancelled,
}

/// A cart line frozen into an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine<'a> {
    /// Product identifier
    pub product_id: ProductId,

    /// Product name
    pub name: String,

    /// Chosen variant
    pub variant: Variant,

    /// Unit price at checkout
    pub unit_price: Money<'a, Currency>,

    /// Number of units
    pub quantity: u32,
}

impl<'a> From<&LineItem<'a>> for OrderLine<'a> {
    fn from(line: &LineItem<'a>) -> Self {
        Self {
            product_id: line.product_id().clone(),
            name: line.name().to_string(),
            variant: line.variant().clone(),
            unit_price: *line.unit_price(),
            quantity: line.quantity(),
        }
    }
}

/// Order
#[derive(Debug, Clone, PartialEq)]
pub struct Order<'a> {
    /// Who placed the order
    pub customer: Customer,

    /// Ordered lines
    pub lines: Vec<OrderLine<'a>>,

    /// Order total
    pub total: Money<'a, Currency>,

    /// Fulfilment status
    pub status: OrderStatus,

    /// Shipping destination
    pub shipping: ShippingDetails,

    /// When the order was placed
    pub created_at: Timestamp,
}

impl Order<'_> {
    /// Total number of units ordered.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}
