//! HTTP route handlers for storefront.
//!
//! All responses are JSON. Request bodies are form-encoded.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Featured products and categories
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Listing (?search=&category=&categories=a,b&sort=)
//! GET  /products/{id}          - Product detail
//!
//! # Cart
//! GET  /cart                   - Cart with order summary
//! POST /cart/add               - Add to cart (product_id, size?, color?, quantity?)
//! POST /cart/update            - Update quantity (product_id, size, color, quantity)
//! POST /cart/remove            - Remove line (product_id, size, color)
//! POST /cart/clear             - Empty the cart
//! GET  /cart/count             - Cart count badge
//!
//! # Checkout
//! GET  /checkout               - Checkout state
//! POST /checkout/shipping      - Save shipping details
//! POST /checkout/payment       - Choose payment method
//! POST /checkout/next          - Advance a step
//! POST /checkout/back          - Go back a step
//! POST /checkout/place-order   - Place the order
//!
//! # Tracking
//! GET  /track/{order_id}       - Tracking lookup
//! ```

pub mod cart;
pub mod checkout;
pub mod home;
pub mod products;
pub mod tracking;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show))
        .route("/shipping", post(checkout::shipping))
        .route("/payment", post(checkout::payment))
        .route("/next", post(checkout::next))
        .route("/back", post(checkout::back))
        .route("/place-order", post(checkout::place_order))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .route("/track/{order_id}", get(tracking::track))
}
