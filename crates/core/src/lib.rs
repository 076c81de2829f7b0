//! Boutique Core - Domain library for the boutique storefront.
//!
//! This crate provides the storefront's domain model and is shared by:
//! - `storefront` - HTTP adapter serving the catalog, cart, and checkout
//! - `cli` - Command-line tools for inspecting the product dataset
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no HTTP,
//! no global state. The cart and checkout flow are plain values owned by
//! whoever drives them; order submission goes through the [`OrderSink`]
//! trait so the caller decides where orders end up.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, and statuses
//! - [`product`] - Product reference data
//! - [`catalog`] - The product catalog and its filter/sort pipeline
//! - [`cart`] - The shopping cart store
//! - [`checkout`] - Order summary, checkout steps, and order placement
//! - [`tracking`] - Static order-tracking records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod product;
pub mod tracking;
pub mod types;

pub use cart::{Cart, CartError, CartLine, LineKey, Quantity};
pub use catalog::{Catalog, CatalogError, CatalogQuery, SortOrder, filter_products};
pub use checkout::{
    CheckoutError, CheckoutFlow, CheckoutStep, Order, OrderConfirmation, OrderSink,
    OrderSinkError, OrderSummary, PricingRules, ShippingDetails,
};
pub use product::Product;
pub use tracking::{TrackingBook, TrackingRecord, TrackingStage};
pub use types::*;
