//! Physical addresses.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// A physical address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    street: String,
    city: String,
    state: String,
    postal_code: String,
    /// ISO 3166-1 alpha-2 country code (e.g. "AE", "US").
    country: String,
}

impl ValueObject for Address {}

impl Address {
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        postal_code: impl Into<String>,
        country: impl Into<String>,
    ) -> DomainResult<Self> {
        let street = street.into();
        let city = city.into();
        let state = state.into();
        let postal_code = postal_code.into();
        let country = country.into();

        for (field, value) in [
            ("street", &street),
            ("city", &city),
            ("state", &state),
            ("postal_code", &postal_code),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!("{field} cannot be empty")));
            }
        }

        if country.len() != 2 || !country.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(DomainError::validation(format!(
                "country must be an ISO alpha-2 code, got: {country}"
            )));
        }

        Ok(Self {
            street,
            city,
            state,
            postal_code,
            country,
        })
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn country(&self) -> &str {
        &self.country
    }
}

impl core::fmt::Display for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}, {}, {} {}, {}",
            self.street, self.city, self.state, self.postal_code, self.country
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_valid_parts() {
        let address = Address::new("1 Sheikh Zayed Rd", "Dubai", "Dubai", "00000", "AE").unwrap();
        assert_eq!(address.country(), "AE");
        assert_eq!(
            address.to_string(),
            "1 Sheikh Zayed Rd, Dubai, Dubai 00000, AE"
        );
    }

    #[test]
    fn rejects_blank_fields_and_bad_country() {
        assert!(Address::new("", "Dubai", "Dubai", "00000", "AE").is_err());
        assert!(Address::new("1 Main St", "Dubai", "Dubai", "00000", "uae").is_err());
        assert!(Address::new("1 Main St", "Dubai", "Dubai", "00000", "A").is_err());
    }

    #[test]
    fn equality_is_structural() {
        let a = Address::new("1 Main St", "Dubai", "Dubai", "00000", "AE").unwrap();
        let b = Address::new("1 Main St", "Dubai", "Dubai", "00000", "AE").unwrap();
        let c = Address::new("2 Main St", "Dubai", "Dubai", "00000", "AE").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
