//! Status enums for orders and payments.

use serde::{Deserialize, Serialize};

/// Status of a placed order.
///
/// Orders leave the storefront confirmed; later stages are reported by
/// [`crate::tracking::TrackingStage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Confirmed,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Confirmed => write!(f, "confirmed"),
        }
    }
}

/// How the customer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[default]
    Cod,
    /// Credit or debit card.
    Card,
}

impl PaymentMethod {
    /// Human-readable label shown on checkout and confirmation.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cod => "Cash on Delivery",
            Self::Card => "Credit/Debit Card",
        }
    }

    /// One-line explanation shown under the label.
    #[must_use]
    pub const fn blurb(self) -> &'static str {
        match self {
            Self::Cod => "Pay when you receive your order",
            Self::Card => "Pay securely with your card",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cod => write!(f, "cod"),
            Self::Card => write!(f, "card"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "cod" => Ok(Self::Cod),
            "card" => Ok(Self::Card),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}
