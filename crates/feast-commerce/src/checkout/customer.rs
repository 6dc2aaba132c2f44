//! Customer contact and delivery details.

use crate::cart::FulfillmentMode;
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Who is ordering, and where to deliver.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CustomerInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// Street address; required for delivery.
    pub address: Option<String>,
    /// Postal code; required for delivery.
    pub zip_code: Option<String>,
    /// City; required for delivery.
    pub city: Option<String>,
    /// Instructions for the kitchen or driver.
    pub notes: Option<String>,
}

impl CustomerInfo {
    /// Create contact details without an address.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: phone.into(),
            ..Self::default()
        }
    }

    /// Set the delivery address.
    pub fn with_address(
        mut self,
        address: impl Into<String>,
        zip_code: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        self.address = Some(address.into());
        self.zip_code = Some(zip_code.into());
        self.city = Some(city.into());
        self
    }

    /// Set notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    /// Address on one line, if complete.
    pub fn one_line_address(&self) -> Option<String> {
        match (&self.address, &self.zip_code, &self.city) {
            (Some(address), Some(zip), Some(city)) => {
                Some(format!("{}, {} {}", address.trim(), zip.trim(), city.trim()))
            }
            _ => None,
        }
    }

    /// Fields still missing for the given fulfillment mode.
    pub fn missing_fields(&self, mode: FulfillmentMode) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.first_name) {
            missing.push("first name");
        }
        if is_blank(&self.last_name) {
            missing.push("last name");
        }
        if is_blank(&self.email) || !self.email.contains('@') {
            missing.push("email");
        }
        if is_blank(&self.phone) {
            missing.push("phone");
        }
        if mode == FulfillmentMode::Delivery {
            if is_blank_opt(&self.address) {
                missing.push("address");
            }
            if is_blank_opt(&self.zip_code) {
                missing.push("zip code");
            }
            if is_blank_opt(&self.city) {
                missing.push("city");
            }
        }
        missing
    }

    /// Check every required field for the mode.
    pub fn validate(&self, mode: FulfillmentMode) -> Result<(), CommerceError> {
        let missing = self.missing_fields(mode);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::CheckoutIncomplete(missing.join(", ")))
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_blank_opt(value: &Option<String>) -> bool {
    value.as_deref().map(is_blank).unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max() -> CustomerInfo {
        CustomerInfo::new("Max", "Mustermann", "max@example.com", "+49 89 123456")
    }

    #[test]
    fn test_pickup_needs_no_address() {
        assert!(max().validate(FulfillmentMode::Pickup).is_ok());
    }

    #[test]
    fn test_delivery_needs_address() {
        let err = max().validate(FulfillmentMode::Delivery).unwrap_err();
        assert_eq!(
            err,
            CommerceError::CheckoutIncomplete("address, zip code, city".to_string())
        );

        let complete = max().with_address("Maximilianstraße 12", "80539", "München");
        assert!(complete.validate(FulfillmentMode::Delivery).is_ok());
        assert_eq!(
            complete.one_line_address().unwrap(),
            "Maximilianstraße 12, 80539 München"
        );
    }

    #[test]
    fn test_missing_contact_fields_reported_together() {
        let info = CustomerInfo::new(" ", "Schmidt", "not-an-email", "");
        assert_eq!(
            info.missing_fields(FulfillmentMode::Pickup),
            vec!["first name", "email", "phone"]
        );
    }
}
