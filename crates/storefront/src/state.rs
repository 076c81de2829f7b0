//! Application state shared across handlers.

use std::sync::Arc;

use boutique_core::{Catalog, OrderSink, PricingRules, TrackingBook};

use crate::config::StorefrontConfig;
use crate::orders::LoggingOrderSink;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Everything in it is fixed at
/// start-up; per-customer data (cart, checkout) lives in the session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    tracking: TrackingBook,
    orders: Arc<dyn OrderSink>,
}

impl AppState {
    /// Create a new application state that logs placed orders.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Loaded product catalog
    /// * `tracking` - Loaded tracking records
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog, tracking: TrackingBook) -> Self {
        Self::with_order_sink(config, catalog, tracking, Arc::new(LoggingOrderSink))
    }

    /// Create a new application state with a custom order sink.
    #[must_use]
    pub fn with_order_sink(
        config: StorefrontConfig,
        catalog: Catalog,
        tracking: TrackingBook,
        orders: Arc<dyn OrderSink>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                tracking,
                orders,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the tracking records.
    #[must_use]
    pub fn tracking(&self) -> &TrackingBook {
        &self.inner.tracking
    }

    /// Shipping and tax rules.
    #[must_use]
    pub fn pricing(&self) -> &PricingRules {
        &self.inner.config.pricing
    }

    /// Where placed orders are submitted.
    #[must_use]
    pub fn orders(&self) -> &dyn OrderSink {
        self.inner.orders.as_ref()
    }
}
