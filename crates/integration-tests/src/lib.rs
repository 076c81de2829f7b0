//! Integration tests for the boutique storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p boutique-integration-tests
//! ```
//!
//! Each test spawns its own storefront on an ephemeral port with the bundled
//! datasets, so tests need no running services and do not share sessions.
//!
//! # Test Categories
//!
//! - `storefront_catalog` - Home, listing, product detail, tracking
//! - `storefront_cart` - Session cart operations
//! - `storefront_checkout` - Checkout steps and order placement

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use boutique_core::OrderSink;
use boutique_storefront::config::StorefrontConfig;
use boutique_storefront::data::{load_catalog, load_tracking};
use boutique_storefront::orders::LoggingOrderSink;
use boutique_storefront::state::AppState;
use reqwest::Client;

/// Path to a dataset bundled with the storefront crate.
#[must_use]
pub fn dataset(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../storefront/data")
        .join(name)
}

/// A storefront running in-process for the duration of a test.
pub struct TestServer {
    pub addr: SocketAddr,
}

impl TestServer {
    /// Spawn a storefront that logs placed orders.
    ///
    /// # Panics
    ///
    /// Panics if the bundled datasets fail to load or no port can be bound.
    pub async fn spawn() -> Self {
        Self::spawn_with_sink(Arc::new(LoggingOrderSink)).await
    }

    /// Spawn a storefront that submits orders to `orders`.
    ///
    /// # Panics
    ///
    /// Panics if the bundled datasets fail to load or no port can be bound.
    #[allow(clippy::expect_used)]
    pub async fn spawn_with_sink(orders: Arc<dyn OrderSink>) -> Self {
        let mut config =
            StorefrontConfig::from_vars(|_| None).expect("default config should load");
        config.catalog_path = dataset("products.json");
        config.tracking_path = dataset("tracking.json");

        let catalog = load_catalog(&config.catalog_path).expect("bundled catalog should load");
        let tracking = load_tracking(&config.tracking_path).expect("bundled tracking should load");
        let state = AppState::with_order_sink(config, catalog, tracking, orders);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("listener has an address");

        tokio::spawn(async move {
            let _ = axum::serve(listener, boutique_storefront::app(state)).await;
        });

        Self { addr }
    }

    /// Absolute URL for a path on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// A client with its own cookie jar, i.e. its own session.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn client(&self) -> Client {
        Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client")
    }
}
