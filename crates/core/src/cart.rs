//! The shopping cart store.
//!
//! A [`Cart`] is a plain owned value: whoever holds it (a session, a test, a
//! CLI command) calls its command methods directly and reads totals back.
//! Lines are keyed by `(product id, size, colour)` and kept in insertion
//! order. Totals are computed from the lines on every read, so they can
//! never disagree with the cart contents.
//!
//! Removing or updating a line that is not in the cart is a no-op, not an
//! error; those methods return `false` so callers can log it.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::product::Product;
use crate::types::{Price, ProductId};

/// A positive item count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(NonZeroU32);

impl Quantity {
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Upper bound of the quantity selector on product views.
    ///
    /// The cart itself accepts any positive quantity; this bound only applies
    /// to [`Quantity::from_selector`] so every selector clamps the same way.
    pub const MAX_SELECTABLE: u32 = 10;

    /// `None` for zero.
    #[must_use]
    pub const fn new(count: u32) -> Option<Self> {
        match NonZeroU32::new(count) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    /// Clamp a selector value into `1..=MAX_SELECTABLE`.
    #[must_use]
    pub fn from_selector(requested: i64) -> Self {
        let clamped = requested.clamp(1, i64::from(Self::MAX_SELECTABLE));
        Self::floored(clamped)
    }

    /// `max(1, requested)`, saturating at `u32::MAX`.
    #[must_use]
    pub fn floored(requested: i64) -> Self {
        let count = u32::try_from(requested.max(1)).unwrap_or(u32::MAX);
        Self::new(count).unwrap_or(Self::ONE)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    #[must_use]
    const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0.get()))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for Quantity {
    type Error = ZeroQuantity;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ZeroQuantity)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returned when a zero is offered where a quantity is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("quantity must be at least 1")]
pub struct ZeroQuantity;

/// Errors from adding to the cart. The cart is unchanged when one occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("product {product_id} is not available in size {size:?}")]
    UnknownSize { product_id: ProductId, size: String },
    #[error("product {product_id} is not available in colour {color:?}")]
    UnknownColor {
        product_id: ProductId,
        color: String,
    },
    #[error("product {0} has no sizes or colours to choose from")]
    NotPurchasable(ProductId),
}

/// Identity of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
}

impl LineKey {
    #[must_use]
    pub fn new(product_id: ProductId, size: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            product_id,
            size: size.into(),
            color: color.into(),
        }
    }
}

/// One product, in one size and colour, with a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: Quantity,
    pub selected_size: String,
    pub selected_color: String,
}

impl CartLine {
    fn is(&self, product_id: ProductId, size: &str, color: &str) -> bool {
        self.product.id == product_id && self.selected_size == size && self.selected_color == color
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.unit_price().times(self.quantity.get())
    }
}

/// The per-session cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of `product` in the given size and colour.
    ///
    /// An existing line with the same key has its quantity increased;
    /// otherwise a new line is appended. Returns the line's quantity after
    /// the add.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownSize`] or [`CartError::UnknownColor`] if
    /// the product does not declare the requested option.
    pub fn add(
        &mut self,
        product: &Product,
        size: &str,
        color: &str,
        quantity: Quantity,
    ) -> Result<Quantity, CartError> {
        if !product.offers_size(size) {
            return Err(CartError::UnknownSize {
                product_id: product.id,
                size: size.to_string(),
            });
        }
        if !product.offers_color(color) {
            return Err(CartError::UnknownColor {
                product_id: product.id,
                color: color.to_string(),
            });
        }

        if let Some(line) = self.find_mut(product.id, size, color) {
            line.quantity = line.quantity.saturating_add(quantity);
            return Ok(line.quantity);
        }

        self.lines.push(CartLine {
            product: product.clone(),
            quantity,
            selected_size: size.to_string(),
            selected_color: color.to_string(),
        });
        Ok(quantity)
    }

    /// Quick add with the product's first size and colour.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotPurchasable`] if the product declares no
    /// sizes or no colours.
    pub fn add_default(
        &mut self,
        product: &Product,
        quantity: Quantity,
    ) -> Result<Quantity, CartError> {
        let (size, color) = product
            .default_options()
            .ok_or(CartError::NotPurchasable(product.id))?;
        self.add(product, size, color, quantity)
    }

    /// Remove the matching line. Returns `false` if there was none.
    pub fn remove(&mut self, product_id: ProductId, size: &str, color: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| !line.is(product_id, size, color));
        self.lines.len() != before
    }

    /// Set the matching line's quantity to `max(1, quantity)`.
    ///
    /// Asking for zero or less leaves the line at 1; lines only leave the
    /// cart through [`Cart::remove`] or [`Cart::clear`]. Returns `false` if
    /// no line matched.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        size: &str,
        color: &str,
        quantity: i64,
    ) -> bool {
        match self.find_mut(product_id, size, color) {
            Some(line) => {
                line.quantity = Quantity::floored(quantity);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity.get())).sum()
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.lines
            .iter()
            .map(CartLine::line_total)
            .fold(Price::zero(), |acc, line| acc + line)
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|l| l.is(key.product_id, &key.size, &key.color))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines (not items).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    fn find_mut(
        &mut self,
        product_id: ProductId,
        size: &str,
        color: &str,
    ) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|l| l.is(product_id, size, color))
    }
}
