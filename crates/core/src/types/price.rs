//! Type-safe price representation using decimal arithmetic.
//!
//! The boutique sells in a single currency (Pakistani rupees), so every
//! price produced by the catalog and cart carries [`CurrencyCode::PKR`].
//! Amounts are in the currency's standard unit (rupees, not paisa).

use core::fmt;
use core::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A price in the store currency.
    #[must_use]
    pub const fn rupees(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::PKR)
    }

    /// Zero in the store currency.
    #[must_use]
    pub const fn zero() -> Self {
        Self::rupees(Decimal::ZERO)
    }

    /// Returns `true` if the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// This price multiplied by a quantity, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self::new(
            self.amount.saturating_mul(Decimal::from(quantity)),
            self.currency_code,
        )
    }

    /// This price scaled by a rate (e.g. `0.13` for 13%), rounded to paisa.
    /// Saturates at [`Decimal::MAX`].
    #[must_use]
    pub fn scaled(self, rate: Decimal) -> Self {
        let amount = self
            .amount
            .saturating_mul(rate)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        Self::new(amount, self.currency_code)
    }

    /// Format for display, e.g. `Rs 15,999` or `Rs 4,419.61`.
    ///
    /// The fractional part is only shown when it is non-zero, matching how
    /// the storefront has always rendered rupee amounts.
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{} {}",
            self.currency_code.symbol(),
            group_thousands(self.amount)
        )
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        debug_assert_eq!(
            self.currency_code, rhs.currency_code,
            "cannot add prices in different currencies"
        );
        Self::new(self.amount.saturating_add(rhs.amount), self.currency_code)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes the store prices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    PKR,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::PKR => "Rs",
        }
    }
}

/// Render an amount with comma thousands separators and at most two
/// fractional digits.
fn group_thousands(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();
    let whole = abs.trunc().normalize().to_string();
    let cents = ((abs - abs.trunc()) * Decimal::ONE_HUNDRED)
        .round()
        .normalize()
        .to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    if cents == "0" {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{cents:0>2}")
    }
}
