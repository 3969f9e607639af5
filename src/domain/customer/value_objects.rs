use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::AddressError;

// ============================================================================
// Customer Value Objects
// ============================================================================

/// Customer address. Immutable once built; change it by replacing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    street: String,
    number: u32,
    zip: String,
    city: String,
}

impl Address {
    pub fn new(
        street: impl Into<String>,
        number: u32,
        zip: impl Into<String>,
        city: impl Into<String>,
    ) -> Result<Self, AddressError> {
        let address = Self {
            street: street.into(),
            number,
            zip: zip.into(),
            city: city.into(),
        };
        address.validate()?;
        Ok(address)
    }

    fn validate(&self) -> Result<(), AddressError> {
        if self.street.is_empty() {
            return Err(AddressError::EmptyStreet);
        }
        if self.number == 0 {
            return Err(AddressError::MissingNumber);
        }
        if self.zip.is_empty() {
            return Err(AddressError::EmptyZip);
        }
        if self.city.is_empty() {
            return Err(AddressError::EmptyCity);
        }
        Ok(())
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {} {}", self.street, self.number, self.zip, self.city)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
