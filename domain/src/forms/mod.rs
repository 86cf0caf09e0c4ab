//! Wizard forms
//!
//! Each form is the single state object of one wizard, its step list, and
//! its submission adapter. Shared building blocks live in [`picker`] and
//! [`plan`].

pub mod contract;
pub mod offer_letter;
pub mod picker;
pub mod plan;
pub mod property_sale;
pub mod tenant_assignment;

use crate::ownership::CoOwnership;
use crate::wizard::form::{FieldError, WizardForm};
use chrono::NaiveDate;
use picker::PropertyPicker;

/// A wizard form that picks properties out of a project's structure
pub trait PropertyForm: WizardForm {
    fn picker(&self) -> &PropertyPicker;
}

impl PropertyForm for property_sale::PropertySaleForm {
    fn picker(&self) -> &PropertyPicker {
        &self.picker
    }
}

impl PropertyForm for contract::ContractForm {
    fn picker(&self) -> &PropertyPicker {
        &self.picker
    }
}

impl PropertyForm for offer_letter::OfferLetterForm {
    fn picker(&self) -> &PropertyPicker {
        &self.picker
    }
}

impl PropertyForm for tenant_assignment::TenantAssignmentForm {
    fn picker(&self) -> &PropertyPicker {
        &self.picker
    }
}

/// Parse a `YYYY-MM-DD` date typed into `field`
pub fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, FieldError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| FieldError::new(field, format!("'{}' is not a YYYY-MM-DD date", raw.trim())))
}

/// Buyer step gate: someone selected and shares totalling 100
pub fn co_ownership_issues(owners: &CoOwnership) -> Vec<FieldError> {
    if owners.is_empty() {
        return vec![FieldError::new("buyers", "select at least one buyer")];
    }
    if !owners.is_balanced() {
        return vec![FieldError::new(
            "buyers",
            format!(
                "ownership shares must be positive and total 100% (currently {}%)",
                owners.total_percentage()
            ),
        )];
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("lease_start", " 2026-01-31 ").unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()
        );
        let err = parse_date("lease_start", "31/01/2026").unwrap_err();
        assert_eq!(err.field, "lease_start");
    }
}
