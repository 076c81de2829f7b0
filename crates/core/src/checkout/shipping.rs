//! Shipping details collected on the first checkout step.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Email, EmailError};

/// Country pre-filled on the shipping form.
pub const DEFAULT_COUNTRY: &str = "Pakistan";

/// Why the shipping step cannot be completed yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShippingError {
    #[error("first name is required")]
    MissingFirstName,
    #[error("delivery address is required")]
    MissingAddress,
    #[error(transparent)]
    Email(#[from] EmailError),
}

/// Shipping form contents.
///
/// Fields are kept as entered so a half-filled form can be stored and
/// edited; [`ShippingDetails::validate`] decides whether it is complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub country: String,
    /// Keep these details for the next checkout in this session.
    #[serde(deserialize_with = "checkbox")]
    pub save_info: bool,
}

impl Default for ShippingDetails {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            zip_code: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
            save_info: false,
        }
    }
}

/// Deserialize a checkbox: a boolean, or the strings an HTML form sends
/// (`on` when ticked).
fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct CheckboxVisitor;

    impl Visitor<'_> for CheckboxVisitor {
        type Value = bool;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a boolean or a checkbox value such as \"on\"")
        }

        fn visit_bool<E>(self, value: bool) -> Result<bool, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_str<E>(self, value: &str) -> Result<bool, E>
        where
            E: de::Error,
        {
            match value.trim().to_ascii_lowercase().as_str() {
                "on" | "true" | "1" | "yes" => Ok(true),
                "" | "off" | "false" | "0" | "no" => Ok(false),
                _ => Err(E::invalid_value(de::Unexpected::Str(value), &self)),
            }
        }
    }

    deserializer.deserialize_any(CheckboxVisitor)
}

impl ShippingDetails {
    /// Check the fields the shipping step requires: first name, email, and
    /// address. Returns the parsed email on success.
    ///
    /// # Errors
    ///
    /// Returns the first missing or invalid required field.
    pub fn validate(&self) -> Result<Email, ShippingError> {
        if self.first_name.trim().is_empty() {
            return Err(ShippingError::MissingFirstName);
        }
        let email = Email::parse(&self.email)?;
        if self.address.trim().is_empty() {
            return Err(ShippingError::MissingAddress);
        }
        Ok(email)
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        let first = self.first_name.trim();
        let last = self.last_name.trim();
        if last.is_empty() {
            first.to_string()
        } else {
            format!("{first} {last}")
        }
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::fixtures::complete;
    use super::*;

    #[test]
    fn test_default_country() {
        assert_eq!(ShippingDetails::default().country, "Pakistan");
    }

    #[test]
    fn test_complete_form_validates() {
        let email = complete().validate().unwrap();
        assert_eq!(email.as_str(), "john.doe@example.com");
        assert_eq!(complete().full_name(), "John Doe");
    }

    #[test]
    fn test_required_fields() {
        let mut form = complete();
        form.first_name = "  ".to_string();
        assert_eq!(form.validate(), Err(ShippingError::MissingFirstName));

        let mut form = complete();
        form.email.clear();
        assert_eq!(
            form.validate(),
            Err(ShippingError::Email(EmailError::Empty))
        );

        let mut form = complete();
        form.address.clear();
        assert_eq!(form.validate(), Err(ShippingError::MissingAddress));
    }

    #[test]
    fn test_optional_fields_may_be_blank() {
        let form = ShippingDetails {
            first_name: "Ayesha".to_string(),
            email: "ayesha@example.pk".to_string(),
            address: "House 4, Gulberg".to_string(),
            ..ShippingDetails::default()
        };
        assert!(form.validate().is_ok());
        assert_eq!(form.full_name(), "Ayesha");
    }

    #[test]
    fn test_save_info_accepts_checkbox_values() {
        let ticked: ShippingDetails = serde_json::from_str(r#"{"save_info":"on"}"#).unwrap();
        assert!(ticked.save_info);

        let stored: ShippingDetails = serde_json::from_str(r#"{"save_info":true}"#).unwrap();
        assert!(stored.save_info);

        let unticked: ShippingDetails = serde_json::from_str(r#"{"save_info":"off"}"#).unwrap();
        assert!(!unticked.save_info);

        assert!(serde_json::from_str::<ShippingDetails>(r#"{"save_info":"maybe"}"#).is_err());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let form: ShippingDetails = serde_json::from_str(r#"{"first_name":"Zainab"}"#).unwrap();
        assert_eq!(form.first_name, "Zainab");
        assert_eq!(form.country, "Pakistan");
    }
}
