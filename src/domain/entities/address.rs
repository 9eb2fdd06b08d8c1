//! # Delivery Address
//!
//! Pickup or delivery location for a shipment.

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A pickup or delivery location.
///
/// Built fresh for every request and never persisted by this crate.
///
/// # Examples
///
/// ```
/// use shipquote::domain::entities::DeliveryAddress;
///
/// let address = DeliveryAddress::builder()
///     .street("12 Admiralty Way")
///     .city("Lekki")
///     .state("Lagos")
///     .country("Nigeria")
///     .phone("+2348000000000")
///     .recipient_name("Ada Obi")
///     .build()
///     .unwrap();
///
/// assert!(address.is_in_state("lagos"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DeliveryAddressRecord")]
pub struct DeliveryAddress {
    /// Street line.
    pub street: String,
    /// City or town.
    pub city: String,
    /// State or region; drives local zone pricing.
    pub state: String,
    /// Country name.
    pub country: String,
    /// Postal code, where one exists.
    pub postal_code: Option<String>,
    /// Landmark to help couriers find the address.
    pub landmark: Option<String>,
    /// Contact phone number.
    pub phone: String,
    /// Contact email.
    pub email: Option<String>,
    /// Name of the person at this address.
    pub recipient_name: String,
}

impl DeliveryAddress {
    /// Starts building an address.
    #[must_use]
    pub fn builder() -> DeliveryAddressBuilder {
        DeliveryAddressBuilder::default()
    }

    /// Returns true if the address is in the given state (case-insensitive).
    #[must_use]
    pub fn is_in_state(&self, state: &str) -> bool {
        self.state.trim().eq_ignore_ascii_case(state.trim())
    }

    /// Returns a single-line rendering used by carriers that take free text.
    #[must_use]
    pub fn one_line(&self) -> String {
        let mut line = format!("{}, {}, {}, {}", self.street, self.city, self.state, self.country);
        if let Some(postal) = &self.postal_code {
            line.push(' ');
            line.push_str(postal);
        }
        line
    }
}

impl fmt::Display for DeliveryAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.one_line(), self.recipient_name)
    }
}

/// Builder for [`DeliveryAddress`].
#[derive(Debug, Clone, Default)]
pub struct DeliveryAddressBuilder {
    street: Option<String>,
    city: Option<String>,
    state: Option<String>,
    country: Option<String>,
    postal_code: Option<String>,
    landmark: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    recipient_name: Option<String>,
}

impl DeliveryAddressBuilder {
    /// Sets the street line.
    #[must_use]
    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.street = Some(street.into());
        self
    }

    /// Sets the city.
    #[must_use]
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Sets the state.
    #[must_use]
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Sets the country.
    #[must_use]
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Sets the postal code.
    #[must_use]
    pub fn postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    /// Sets the landmark.
    #[must_use]
    pub fn landmark(mut self, landmark: impl Into<String>) -> Self {
        self.landmark = Some(landmark.into());
        self
    }

    /// Sets the phone number.
    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the email.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the recipient name.
    #[must_use]
    pub fn recipient_name(mut self, name: impl Into<String>) -> Self {
        self.recipient_name = Some(name.into());
        self
    }

    /// Builds the address.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAddress` if a required field is missing or blank.
    pub fn build(self) -> DomainResult<DeliveryAddress> {
        Ok(DeliveryAddress {
            street: required("street", self.street)?,
            city: required("city", self.city)?,
            state: required("state", self.state)?,
            country: required("country", self.country)?,
            postal_code: self.postal_code,
            landmark: self.landmark,
            phone: required("phone", self.phone)?,
            email: self.email,
            recipient_name: required("recipient_name", self.recipient_name)?,
        })
    }
}

/// Unvalidated wire shape of [`DeliveryAddress`].
#[derive(Deserialize)]
struct DeliveryAddressRecord {
    street: String,
    city: String,
    state: String,
    country: String,
    postal_code: Option<String>,
    landmark: Option<String>,
    phone: String,
    email: Option<String>,
    recipient_name: String,
}

impl TryFrom<DeliveryAddressRecord> for DeliveryAddress {
    type Error = DomainError;

    fn try_from(record: DeliveryAddressRecord) -> DomainResult<Self> {
        DeliveryAddressBuilder {
            street: Some(record.street),
            city: Some(record.city),
            state: Some(record.state),
            country: Some(record.country),
            postal_code: record.postal_code,
            landmark: record.landmark,
            phone: Some(record.phone),
            email: record.email,
            recipient_name: Some(record.recipient_name),
        }
        .build()
    }
}

fn required(field: &str, value: Option<String>) -> DomainResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(DomainError::invalid_address(format!("{field} is required"))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn base() -> DeliveryAddressBuilder {
        DeliveryAddress::builder()
            .street("1 Marina")
            .city("Ibadan")
            .state("Oyo")
            .country("Nigeria")
            .phone("+2348011111111")
            .recipient_name("Tunde")
    }

    #[test]
    fn builds_with_required_fields() {
        let address = base().build().unwrap();
        assert_eq!(address.state, "Oyo");
        assert!(address.postal_code.is_none());
    }

    #[test]
    fn blank_required_field_is_rejected() {
        let err = base().city("  ").build().unwrap_err();
        assert!(matches!(err, DomainError::InvalidAddress(ref m) if m.contains("city")));
    }

    #[test]
    fn missing_phone_is_rejected() {
        let err = DeliveryAddress::builder()
            .street("x")
            .city("x")
            .state("x")
            .country("x")
            .recipient_name("x")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("phone"));
    }

    #[test]
    fn state_match_ignores_case_and_whitespace() {
        let address = base().state(" OYO ").build().unwrap();
        assert!(address.is_in_state("oyo"));
        assert!(!address.is_in_state("ogun"));
    }

    #[test]
    fn deserialization_requires_non_blank_fields() {
        let json = r#"{"street":"1 Marina","city":" ","state":"Oyo","country":"Nigeria",
            "phone":"+2348011111111","recipient_name":"Tunde"}"#;
        let err = serde_json::from_str::<DeliveryAddress>(json).unwrap_err();
        assert!(err.to_string().contains("city"));

        let address = base().email("t@example.com").build().unwrap();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(serde_json::from_str::<DeliveryAddress>(&json).unwrap(), address);
    }

    #[test]
    fn one_line_includes_postal_code() {
        let address = base().postal_code("200001").build().unwrap();
        assert_eq!(address.one_line(), "1 Marina, Ibadan, Oyo, Nigeria 200001");
    }
}
