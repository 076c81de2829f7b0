//! Placed orders and the hand-off point for order submission.
//!
//! Orders are not persisted anywhere by this crate. [`OrderSink`] is the
//! seam where a real order backend would plug in; until one exists the
//! storefront installs a sink that only logs.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::shipping::ShippingDetails;
use super::summary::OrderSummary;
use crate::cart::CartLine;
use crate::types::{Email, OrderStatus, PaymentMethod};

/// Days between placing an order and its estimated delivery.
pub const DELIVERY_ESTIMATE_DAYS: u64 = 5;

/// Display-only order number, `ORD-` followed by eight digits.
///
/// Derived from the placement time; it is not issued by any backend and is
/// not guaranteed unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Last eight digits of the placement time in epoch milliseconds.
    #[must_use]
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        let digits = at.timestamp_millis().rem_euclid(100_000_000);
        Self(format!("ORD-{digits:08}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A submitted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub number: OrderNumber,
    pub shipping: ShippingDetails,
    pub email: Email,
    pub payment_method: PaymentMethod,
    pub lines: Vec<CartLine>,
    pub summary: OrderSummary,
    pub placed_at: DateTime<Utc>,
    pub status: OrderStatus,
}

impl Order {
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity.get())).sum()
    }
}

/// What the customer sees after placing an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order: Order,
    pub estimated_delivery: NaiveDate,
}

impl OrderConfirmation {
    #[must_use]
    pub fn new(order: Order) -> Self {
        let placed_on = order.placed_at.date_naive();
        let estimated_delivery = placed_on
            .checked_add_days(Days::new(DELIVERY_ESTIMATE_DAYS))
            .unwrap_or(placed_on);
        Self {
            order,
            estimated_delivery,
        }
    }
}

/// Failure reported by an [`OrderSink`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("order submission failed: {0}")]
pub struct OrderSinkError(pub String);

/// Receives orders as they are placed.
pub trait OrderSink: Send + Sync {
    /// Accept an order for fulfilment.
    ///
    /// # Errors
    ///
    /// Returns an error if the order could not be accepted; the caller then
    /// keeps the cart so the customer can retry.
    fn submit(&self, order: &Order) -> Result<(), OrderSinkError>;
}
