//! Order sinks

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::checkout::order::{Order, OrderStatus};

/// Identifier assigned to a submitted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderId(u64);

impl OrderId {
    /// Wrap a raw order number.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The raw order number.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order-{:06}", self.0)
    }
}

/// The order store refused or failed to accept an order.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{reason}")]
pub struct SubmissionError {
    reason: String,
}

impl SubmissionError {
    /// Create a submission error with a human readable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// No stored order has this id.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown order {0}")]
pub struct UnknownOrder(pub OrderId);

/// Destination for placed orders, e.g. a document store collection.
pub trait OrderSink<'a> {
    /// Persist an order and return its identifier.
    ///
    /// # Errors
    ///
    /// Returns a [`SubmissionError`] if the order could not be stored.
    fn submit(&mut self, order: Order<'a>) -> Result<OrderId, SubmissionError>;
}

/// In-memory order book.
///
/// Ids are never reused, even after an order is removed.
#[derive(Debug, Default)]
pub struct MemoryOrderBook<'a> {
    orders: Vec<(OrderId, Order<'a>)>,
    last_id: u64,
}

impl<'a> MemoryOrderBook<'a> {
    /// Create an empty order book.
    #[must_use]
    pub fn new() -> Self {
        Self {
            orders: Vec::new(),
            last_id: 0,
        }
    }

    /// Look up an order.
    pub fn get(&self, id: OrderId) -> Option<&Order<'a>> {
        self.orders
            .iter()
            .find(|(order_id, _)| *order_id == id)
            .map(|(_, order)| order)
    }

    /// Iterate over orders in submission order.
    pub fn iter(&self) -> impl Iterator<Item = (OrderId, &Order<'a>)> {
        self.orders.iter().map(|(id, order)| (*id, order))
    }

    /// Orders placed by the account `uid`, in submission order. Guest orders
    /// never match.
    pub fn orders_for<'s>(
        &'s self,
        uid: &'s str,
    ) -> impl Iterator<Item = (OrderId, &'s Order<'a>)> + 's {
        self.iter()
            .filter(move |(_, order)| order.customer.uid() == Some(uid))
    }

    /// Every order, newest first by placement time. Orders placed at the same
    /// instant keep the later id first.
    pub fn recent(&self) -> Vec<(OrderId, &Order<'a>)> {
        let mut orders: Vec<_> = self.iter().collect();

        orders.sort_by(|(a_id, a), (b_id, b)| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b_id.cmp(a_id))
        });

        orders
    }

    /// Change an order's fulfilment status.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownOrder`] if no order has this id.
    pub fn set_status(&mut self, id: OrderId, status: OrderStatus) -> Result<(), UnknownOrder> {
        let order = self
            .orders
            .iter_mut()
            .find(|(order_id, _)| *order_id == id)
            .map(|(_, order)| order)
            .ok_or(UnknownOrder(id))?;

        debug!(%id, from = ?order.status, to = ?status, "order status changed");

        order.status = status;

        Ok(())
    }

    /// Delete an order, returning it if it existed.
    pub fn remove(&mut self, id: OrderId) -> Option<Order<'a>> {
        let index = self.orders.iter().position(|(order_id, _)| *order_id == id)?;
        let (_, order) = self.orders.remove(index);

        debug!(%id, "order removed");

        Some(order)
    }

    /// Number of stored orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Check if no orders are stored.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl<'a> OrderSink<'a> for MemoryOrderBook<'a> {
    fn submit(&mut self, order: Order<'a>) -> Result<OrderId, SubmissionError> {
        let next = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| SubmissionError::new("order ids exhausted"))?;

        let id = OrderId::new(next);

        self.last_id = next;
        self.orders.push((id, order));

        Ok(id)
    }
}
