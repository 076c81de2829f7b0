//! Price a cart from the command line.
//!
//! Each `--item` is `id[:size:color[:quantity]]`. Leaving out size and colour
//! picks the product's first ones, like the quick-add button.

use std::path::Path;
use std::str::FromStr;

use boutique_core::{Cart, ProductId, Quantity};
use boutique_storefront::config::StorefrontConfig;
use boutique_storefront::data::load_catalog;
use thiserror::Error;
use tracing::info;

use super::CliError;

/// Why an `--item` argument could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteItemError {
    #[error("invalid product id {0:?}")]
    ProductId(String),
    #[error("give both size and colour, or neither")]
    PartialOptions,
    #[error("invalid quantity {0:?}")]
    Quantity(String),
    #[error("too many fields, expected id[:size:color[:quantity]]")]
    TooManyFields,
}

/// One requested cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteItem {
    pub product_id: ProductId,
    pub options: Option<(String, String)>,
    pub quantity: Quantity,
}

impl FromStr for QuoteItem {
    type Err = QuoteItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(':').map(str::trim).collect();

        let (id, options, quantity) = match fields.as_slice() {
            [id] => (*id, None, None),
            [id, size, color] => (*id, Some((*size, *color)), None),
            [id, size, color, quantity] => (*id, Some((*size, *color)), Some(*quantity)),
            [_, _] => return Err(QuoteItemError::PartialOptions),
            _ => return Err(QuoteItemError::TooManyFields),
        };

        let product_id = id
            .parse::<ProductId>()
            .map_err(|_| QuoteItemError::ProductId(id.to_string()))?;
        let quantity = match quantity {
            None => Quantity::ONE,
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .and_then(Quantity::new)
                .ok_or_else(|| QuoteItemError::Quantity(raw.to_string()))?,
        };

        Ok(Self {
            product_id,
            options: options.map(|(size, color)| (size.to_string(), color.to_string())),
            quantity,
        })
    }
}

/// Build a cart from `items` and log its order summary.
///
/// # Errors
///
/// Returns an error if the dataset or pricing config cannot be loaded, a
/// product id is unknown, or an option is not offered by the product.
pub fn run(file: &Path, items: &[QuoteItem]) -> Result<(), CliError> {
    let catalog = load_catalog(file)?;
    let rules = StorefrontConfig::from_env()?.pricing;

    let mut cart = Cart::new();
    for item in items {
        let product = catalog
            .get(item.product_id)
            .ok_or(CliError::UnknownProduct(item.product_id))?;
        match &item.options {
            Some((size, color)) => cart.add(product, size, color, item.quantity)?,
            None => cart.add_default(product, item.quantity)?,
        };
    }

    for line in cart.lines() {
        info!(
            size = %line.selected_size,
            color = %line.selected_color,
            quantity = %line.quantity,
            total = %line.line_total().display(),
            "{}",
            line.product.name
        );
    }

    let summary = rules.summarize_cart(&cart);
    let shipping = if summary.ships_free() {
        "Free".to_string()
    } else {
        summary.shipping.display()
    };
    info!(
        items = cart.total_items(),
        subtotal = %summary.subtotal.display(),
        shipping = %shipping,
        tax = %summary.tax.display(),
        total = %summary.total.display(),
        "Quote"
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_item() {
        let item: QuoteItem = "2:L:Black:2".parse().unwrap();
        assert_eq!(item.product_id, ProductId::new(2));
        assert_eq!(
            item.options,
            Some(("L".to_string(), "Black".to_string()))
        );
        assert_eq!(item.quantity.get(), 2);
    }

    #[test]
    fn test_parse_defaults() {
        let item: QuoteItem = "7".parse().unwrap();
        assert_eq!(item.options, None);
        assert_eq!(item.quantity, Quantity::ONE);

        let item: QuoteItem = "1:M:Navy Blue".parse().unwrap();
        assert_eq!(
            item.options,
            Some(("M".to_string(), "Navy Blue".to_string()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "x".parse::<QuoteItem>(),
            Err(QuoteItemError::ProductId("x".to_string()))
        );
        assert_eq!(
            "1:M".parse::<QuoteItem>(),
            Err(QuoteItemError::PartialOptions)
        );
        assert_eq!(
            "1:M:Red:0".parse::<QuoteItem>(),
            Err(QuoteItemError::Quantity("0".to_string()))
        );
        assert_eq!(
            "1:M:Red:1:extra".parse::<QuoteItem>(),
            Err(QuoteItemError::TooManyFields)
        );
    }
}
