//! Product reference data.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A product from the static catalog dataset.
///
/// Products are read-only for the lifetime of the process. The JSON shape
/// matches the dataset file: `price` is a bare number in rupees, `sizes` and
/// `colors` are ordered option labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub category: String,
    pub image: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl Product {
    /// Unit price in the store currency.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::rupees(self.price)
    }

    /// A product can go into the cart only if it declares at least one size
    /// and one colour.
    #[must_use]
    pub fn is_purchasable(&self) -> bool {
        !self.sizes.is_empty() && !self.colors.is_empty()
    }

    #[must_use]
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    #[must_use]
    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// First declared size and colour, used by quick add from a product card.
    #[must_use]
    pub fn default_options(&self) -> Option<(&str, &str)> {
        let size = self.sizes.first()?;
        let color = self.colors.first()?;
        Some((size.as_str(), color.as_str()))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Small product set shared by unit tests across the crate.

    use super::*;

    pub fn product(id: i32, name: &str, price: i64, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Decimal::from(price),
            category: category.to_string(),
            image: format!("/images/{id}.jpg"),
            sizes: vec!["S".to_string(), "M".to_string(), "L".to_string()],
            colors: vec!["Red".to_string(), "Black".to_string()],
            description: format!("{name} description"),
        }
    }
}
