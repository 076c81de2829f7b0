//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: <http://localhost:3000>);
//!   an `https` URL turns on secure session cookies
//! - `STOREFRONT_CATALOG_PATH` - Product dataset (default: crates/storefront/data/products.json)
//! - `STOREFRONT_TRACKING_PATH` - Tracking dataset (default: crates/storefront/data/tracking.json)
//! - `STOREFRONT_FREE_SHIPPING_THRESHOLD` - Subtotals above this ship free (default: 10000)
//! - `STOREFRONT_SHIPPING_FEE` - Flat fee below the threshold (default: 200)
//! - `STOREFRONT_TAX_RATE` - Tax as a fraction (default: 0.13)
//! - `STOREFRONT_SESSION_CAPACITY` - Most sessions held in memory; the least
//!   recently used are evicted beyond this (default: 100000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.1)

use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroU64;
use std::path::PathBuf;
use std::str::FromStr;

use boutique_core::PricingRules;
use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: Url,
    /// Product dataset file
    pub catalog_path: PathBuf,
    /// Tracking dataset file (missing file means no tracking records)
    pub tracking_path: PathBuf,
    /// Shipping and tax rules
    pub pricing: PricingRules,
    /// Upper bound on sessions kept in the session store
    pub session_capacity: NonZeroU64,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// Unset variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let base_url: Url = vars.parsed("STOREFRONT_BASE_URL", "http://localhost:3000")?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_BASE_URL".to_string(),
                format!("unsupported scheme {}", base_url.scheme()),
            ));
        }

        let defaults = PricingRules::default();
        let pricing = PricingRules {
            free_shipping_threshold: vars.decimal(
                "STOREFRONT_FREE_SHIPPING_THRESHOLD",
                defaults.free_shipping_threshold,
            )?,
            shipping_fee: vars.decimal("STOREFRONT_SHIPPING_FEE", defaults.shipping_fee)?,
            tax_rate: vars.decimal("STOREFRONT_TAX_RATE", defaults.tax_rate)?,
        };

        Ok(Self {
            host: vars.parsed("STOREFRONT_HOST", "127.0.0.1")?,
            port: vars.parsed("STOREFRONT_PORT", "3000")?,
            base_url,
            catalog_path: vars
                .get_or_default("STOREFRONT_CATALOG_PATH", "crates/storefront/data/products.json")
                .into(),
            tracking_path: vars
                .get_or_default("STOREFRONT_TRACKING_PATH", "crates/storefront/data/tracking.json")
                .into(),
            pricing,
            session_capacity: vars.parsed("STOREFRONT_SESSION_CAPACITY", "100000")?,
            sentry_dsn: vars.optional("SENTRY_DSN"),
            sentry_environment: vars.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: vars.parsed("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: vars.parsed("SENTRY_TRACES_SAMPLE_RATE", "0.1")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn get_or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable (or its default) with `FromStr`.
    fn parsed<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get_or_default(key, default)
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }

    /// Parse a non-negative decimal amount.
    fn decimal(&self, key: &str, default: Decimal) -> Result<Decimal, ConfigError> {
        let Some(raw) = self.optional(key) else {
            return Ok(default);
        };
        let value = Decimal::from_str(raw.trim())
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                "must not be negative".to_string(),
            ));
        }
        Ok(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.base_url.as_str(), "http://localhost:3000/");
        assert!(!config.is_secure());
        assert_eq!(config.pricing, PricingRules::default());
        assert!(config.sentry_dsn.is_none());
        assert!(config.catalog_path.ends_with("products.json"));
        assert_eq!(config.session_capacity.get(), 100_000);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STOREFRONT_PORT", "8080"),
            ("STOREFRONT_BASE_URL", "https://shop.example.pk"),
            ("STOREFRONT_TAX_RATE", "0.17"),
            ("STOREFRONT_SHIPPING_FEE", "250"),
            ("STOREFRONT_SESSION_CAPACITY", "5000"),
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert!(config.is_secure());
        assert_eq!(config.pricing.tax_rate, Decimal::new(17, 2));
        assert_eq!(config.pricing.shipping_fee, Decimal::from(250));
        assert_eq!(config.pricing.free_shipping_threshold, Decimal::from(10_000));
        assert_eq!(config.session_capacity.get(), 5_000);
        assert!(config.sentry_dsn.is_some());
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = load(&[("STOREFRONT_PORT", " "), ("SENTRY_DSN", "")]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_values() {
        let err = load(&[("STOREFRONT_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "STOREFRONT_PORT"));

        assert!(load(&[("STOREFRONT_BASE_URL", "not a url")]).is_err());
        assert!(load(&[("STOREFRONT_BASE_URL", "ftp://files.example.com")]).is_err());
        assert!(load(&[("STOREFRONT_TAX_RATE", "-0.1")]).is_err());
        assert!(load(&[("STOREFRONT_HOST", "localhost")]).is_err());
        assert!(load(&[("STOREFRONT_SESSION_CAPACITY", "0")]).is_err());
    }
}
