//! Subtotal, shipping, tax, and total for a cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::types::Price;

/// Shipping and tax rules applied on top of the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRules {
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: Decimal,
    /// Flat shipping fee below the threshold.
    pub shipping_fee: Decimal,
    /// Sales tax as a fraction (0.13 = 13%).
    pub tax_rate: Decimal,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Decimal::from(10_000),
            shipping_fee: Decimal::from(200),
            tax_rate: Decimal::new(13, 2),
        }
    }
}

impl PricingRules {
    /// Summarize an arbitrary subtotal.
    #[must_use]
    pub fn summarize(&self, subtotal: Price) -> OrderSummary {
        let shipping = if subtotal.amount > self.free_shipping_threshold {
            Price::new(Decimal::ZERO, subtotal.currency_code)
        } else {
            Price::new(self.shipping_fee, subtotal.currency_code)
        };
        let tax = subtotal.scaled(self.tax_rate);

        OrderSummary {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    /// Summarize the current cart contents.
    #[must_use]
    pub fn summarize_cart(&self, cart: &Cart) -> OrderSummary {
        self.summarize(cart.total_price())
    }

    /// Tax rate as a whole percentage for labels such as "Tax (13%)".
    #[must_use]
    pub fn tax_percent(&self) -> Decimal {
        (self.tax_rate * Decimal::ONE_HUNDRED).normalize()
    }
}

/// Money breakdown shown in the cart and checkout sidebars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub subtotal: Price,
    pub shipping: Price,
    pub tax: Price,
    pub total: Price,
}

impl OrderSummary {
    #[must_use]
    pub fn ships_free(&self) -> bool {
        self.shipping.is_zero()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::Quantity;
    use crate::product::fixtures::product;

    fn rupees(amount: Decimal) -> Price {
        Price::rupees(amount)
    }

    #[test]
    fn test_free_shipping_above_threshold() {
        let summary = PricingRules::default().summarize(rupees(Decimal::from(33_997)));
        assert!(summary.ships_free());
        assert_eq!(summary.tax.amount, Decimal::new(441_961, 2));
        assert_eq!(summary.total.amount, Decimal::new(3_841_661, 2));
        assert_eq!(summary.total.display(), "Rs 38,416.61");
    }

    #[test]
    fn test_flat_fee_at_or_below_threshold() {
        let rules = PricingRules::default();

        let small = rules.summarize(rupees(Decimal::from(5_000)));
        assert_eq!(small.shipping.amount, Decimal::from(200));
        assert_eq!(small.tax.amount, Decimal::from(650));
        assert_eq!(small.total.amount, Decimal::from(5_850));

        let edge = rules.summarize(rupees(Decimal::from(10_000)));
        assert!(!edge.ships_free());
    }

    #[test]
    fn test_empty_cart_summary() {
        let summary = PricingRules::default().summarize_cart(&Cart::new());
        assert!(summary.subtotal.is_zero());
        assert_eq!(summary.shipping.amount, Decimal::from(200));
        assert_eq!(summary.total.amount, Decimal::from(200));
    }

    #[test]
    fn test_summarize_cart_uses_live_totals() {
        let mut cart = Cart::new();
        let kaftan = product(1, "Elegant Silk Kaftan", 15_999, "kaftans");
        let abaya = product(2, "Traditional Abaya", 8_999, "abayas");
        cart.add(&kaftan, "M", "Red", Quantity::ONE).unwrap();
        cart.add(&abaya, "L", "Black", Quantity::new(2).unwrap()).unwrap();

        let summary = PricingRules::default().summarize_cart(&cart);
        assert_eq!(summary.subtotal.amount, Decimal::from(33_997));
    }

    #[test]
    fn test_tax_percent_label() {
        assert_eq!(PricingRules::default().tax_percent().to_string(), "13");
    }
}
