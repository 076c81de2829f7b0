//! Multi-step checkout: shipping, payment, confirmation, then order placement.
//!
//! [`CheckoutFlow`] holds the form state and the current step. It is a plain
//! value like [`Cart`], owned by the session and passed to
//! [`CheckoutFlow::place_order`] together with the cart it should empty.

mod order;
mod shipping;
mod summary;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::Cart;
use crate::types::{OrderStatus, PaymentMethod};

pub use order::{
    DELIVERY_ESTIMATE_DAYS, Order, OrderConfirmation, OrderNumber, OrderSink, OrderSinkError,
};
pub use shipping::{DEFAULT_COUNTRY, ShippingDetails, ShippingError};
pub use summary::{OrderSummary, PricingRules};

/// Checkout steps in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    #[default]
    Shipping,
    Payment,
    Confirmation,
}

impl CheckoutStep {
    pub const ALL: [Self; 3] = [Self::Shipping, Self::Payment, Self::Confirmation];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Shipping => "Shipping",
            Self::Payment => "Payment",
            Self::Confirmation => "Confirmation",
        }
    }

    /// Zero-based position, for progress indicators.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    const fn next(self) -> Option<Self> {
        match self {
            Self::Shipping => Some(Self::Payment),
            Self::Payment => Some(Self::Confirmation),
            Self::Confirmation => None,
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::Shipping | Self::Payment => Self::Shipping,
            Self::Confirmation => Self::Payment,
        }
    }
}

/// Result of pressing "Next".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved on to this step.
    Advanced(CheckoutStep),
    /// Already on confirmation; the order can be placed.
    ReadyToPlace,
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Shipping(#[from] ShippingError),
    #[error("cannot place an order with an empty cart")]
    EmptyCart,
    #[error("order can only be placed from the confirmation step (currently on {})", .0.label())]
    NotConfirmed(CheckoutStep),
    #[error(transparent)]
    Submission(#[from] OrderSinkError),
}

/// Checkout form state for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    pub shipping: ShippingDetails,
    pub payment_method: PaymentMethod,
}

impl CheckoutFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Try to move to the next step.
    ///
    /// Leaving the shipping step requires valid shipping details. Payment
    /// always has a method selected, so it never blocks.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Shipping`] if the shipping form is
    /// incomplete; the step does not change.
    pub fn next(&mut self) -> Result<StepOutcome, CheckoutError> {
        if self.step == CheckoutStep::Shipping {
            self.shipping.validate()?;
        }

        match self.step.next() {
            Some(step) => {
                self.step = step;
                Ok(StepOutcome::Advanced(step))
            }
            None => Ok(StepOutcome::ReadyToPlace),
        }
    }

    /// Move back one step, stopping at shipping.
    pub const fn back(&mut self) -> CheckoutStep {
        self.step = self.step.previous();
        self.step
    }

    /// Place the order for everything in `cart`.
    ///
    /// The order is handed to `sink`; only when the sink accepts it is the
    /// cart cleared and the flow reset to the shipping step. Shipping
    /// details survive the reset when the customer ticked "save info".
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`] if there is nothing to order
    /// - [`CheckoutError::NotConfirmed`] if the flow is not on confirmation
    /// - [`CheckoutError::Shipping`] if the shipping details became invalid
    /// - [`CheckoutError::Submission`] if the sink rejects the order
    ///
    /// In every error case the cart and flow are left untouched.
    pub fn place_order(
        &mut self,
        cart: &mut Cart,
        rules: &PricingRules,
        sink: &dyn OrderSink,
        now: DateTime<Utc>,
    ) -> Result<OrderConfirmation, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        if self.step != CheckoutStep::Confirmation {
            return Err(CheckoutError::NotConfirmed(self.step));
        }
        let email = self.shipping.validate()?;

        let order = Order {
            number: OrderNumber::from_timestamp(now),
            shipping: self.shipping.clone(),
            email,
            payment_method: self.payment_method,
            lines: cart.lines().to_vec(),
            summary: rules.summarize_cart(cart),
            placed_at: now,
            status: OrderStatus::Confirmed,
        };

        sink.submit(&order)?;

        cart.clear();
        let kept = self.shipping.save_info.then(|| self.shipping.clone());
        *self = Self {
            shipping: kept.unwrap_or_default(),
            ..Self::default()
        };

        Ok(OrderConfirmation::new(order))
    }
}
