//! The static product catalog and its filter/sort pipeline.
//!
//! A [`Catalog`] is built once at start-up from the product dataset and never
//! changes afterwards. Listings are produced by running a [`CatalogQuery`]
//! through [`filter_products`], which recomputes the whole view on every
//! call; the dataset is a few dozen records, so there is no index.

mod category;
mod query;

use std::collections::HashSet;
use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::product::Product;
use crate::types::ProductId;

pub use category::{KNOWN_CATEGORIES, category_label};
pub use query::{CatalogQuery, SortOrder, UnknownSortOrder, filter_products};

/// Number of products shown in the featured strip on the home view.
pub const FEATURED_COUNT: usize = 4;

/// Highest unit price a dataset record may carry, in rupees.
pub const MAX_PRICE: i64 = 1_000_000_000;

/// Errors raised while building a catalog from dataset records.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid product dataset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
    #[error("product {0} is priced above {MAX_PRICE}")]
    PriceTooHigh(ProductId),
}

/// The immutable product list, cheaply cloneable.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Arc<[Product]>,
}

impl Catalog {
    /// Build a catalog, keeping dataset order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two records share an id and
    /// [`CatalogError::NegativePrice`] if any price is below zero, or
    /// [`CatalogError::PriceTooHigh`] if it is above [`MAX_PRICE`].
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if product.price.is_sign_negative() && !product.price.is_zero() {
                return Err(CatalogError::NegativePrice(product.id));
            }
            if product.price > Decimal::from(MAX_PRICE) {
                return Err(CatalogError::PriceTooHigh(product.id));
            }
        }

        Ok(Self {
            products: products.into(),
        })
    }

    /// Parse a JSON array of product records.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the records fail
    /// [`Catalog::new`] validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// The first `count` products in dataset order.
    #[must_use]
    pub fn featured(&self, count: usize) -> &[Product] {
        let end = count.min(self.products.len());
        self.products.get(..end).unwrap_or_default()
    }

    /// Distinct category tags in order of first appearance.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for product in self.products.iter() {
            if !out.contains(&product.category.as_str()) {
                out.push(&product.category);
            }
        }
        out
    }

    /// Products that cannot be added to the cart because they declare no
    /// sizes or no colours.
    pub fn unpurchasable(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| !p.is_purchasable())
    }

    /// Run a query against this catalog.
    #[must_use]
    pub fn search(&self, query: &CatalogQuery) -> Vec<&Product> {
        filter_products(&self.products, query)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
