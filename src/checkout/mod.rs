//! Checkout
//!
//! Turns a cart into an order. All validation lives here, in front of the
//! cart, which itself accepts anything.

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{Span, info};

use crate::{auth::AuthState, cart::Cart};

pub mod order;
pub mod sink;

pub use order::{Customer, Order, OrderLine, OrderStatus, ShippingDetails};
pub use sink::{MemoryOrderBook, OrderId, OrderSink, SubmissionError, UnknownOrder};

/// Errors that stop an order from being placed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// A shipping field was blank.
    #[error("Shipping field {0} is required")]
    MissingField(&'static str),

    /// The cart has no lines.
    #[error("Your cart is empty")]
    EmptyCart,

    /// The order sink did not accept the order.
    #[error("Failed to submit order: {0}")]
    Submission(#[from] SubmissionError),
}

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation<'a> {
    /// Identifier assigned by the order sink
    pub order_id: OrderId,

    /// Amount charged
    pub total: Money<'a, Currency>,

    /// Units ordered
    pub item_count: u64,
}

/// Place an order for the cart's contents.
///
/// Shipping details are validated before the cart is looked at. The cart is
/// cleared only once the sink has accepted the order; on any error it is left
/// untouched so the shopper can retry.
///
/// # Errors
///
/// - [`CheckoutError::MissingField`]: a shipping field is blank.
/// - [`CheckoutError::EmptyCart`]: there is nothing to order.
/// - [`CheckoutError::Submission`]: the sink rejected the order.
#[tracing::instrument(
    name = "checkout.place_order",
    skip_all,
    fields(lines = cart.len(), order_id = tracing::field::Empty)
)]
pub fn checkout<'a, S>(
    cart: &mut Cart<'a>,
    auth: &AuthState,
    shipping: ShippingDetails,
    sink: &mut S,
) -> Result<Confirmation<'a>, CheckoutError>
where
    S: OrderSink<'a> + ?Sized,
{
    let shipping = shipping.validated()?;

    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let order = Order {
        customer: Customer::from_auth(auth),
        lines: cart.lines().map(OrderLine::from).collect(),
        total: cart.total(),
        status: OrderStatus::Pending,
        shipping,
        created_at: Timestamp::now(),
    };

    let total = order.total;
    let item_count = order.item_count();
    let customer = order.customer.to_string();

    let order_id = sink.submit(order)?;

    Span::current().record("order_id", tracing::field::display(order_id));
    info!(%order_id, %customer, %total, item_count, "placed order");

    cart.clear();

    Ok(Confirmation {
        order_id,
        total,
        item_count,
    })
}
