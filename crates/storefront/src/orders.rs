//! Order submission.
//!
//! There is no order backend yet. Placed orders are logged and recorded as a
//! Sentry breadcrumb, nothing more.

use boutique_core::{Order, OrderSink, OrderSinkError};

use crate::error::add_breadcrumb;

/// Order sink that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingOrderSink;

impl OrderSink for LoggingOrderSink {
    fn submit(&self, order: &Order) -> Result<(), OrderSinkError> {
        tracing::info!(
            order_number = %order.number,
            payment_method = %order.payment_method,
            items = order.total_items(),
            total = %order.summary.total,
            city = %order.shipping.city,
            "Order placed"
        );
        add_breadcrumb(
            "checkout",
            "Order placed",
            Some(&[("order_number", order.number.as_str())]),
        );
        Ok(())
    }
}
