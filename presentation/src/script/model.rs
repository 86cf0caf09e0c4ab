//! Wizard script file format
//!
//! ```toml
//! wizard = "property-sale"
//! project = "Green Valley"
//! block = "A"
//! units = ["A-101", "A-102"]
//! buyers = ["ana@example.com", "ben@example.com"]
//! agent = "Sam Realtor"
//!
//! [shares]
//! "ana@example.com" = 60
//! "ben@example.com" = 40
//!
//! [terms]
//! commission = "2.5"
//! template = "Monthly 12"
//! ```

use super::error::ScriptError;
use estatedesk_domain::{
    CommissionType, ContractForm, OfferLetterForm, PropertySaleForm, TenantAssignmentForm,
    WizardForm,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Which wizard a script drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WizardKind {
    PropertySale,
    Contract,
    OfferLetter,
    TenantAssignment,
}

impl WizardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardKind::PropertySale => PropertySaleForm::NAME,
            WizardKind::Contract => ContractForm::NAME,
            WizardKind::OfferLetter => OfferLetterForm::NAME,
            WizardKind::TenantAssignment => TenantAssignmentForm::NAME,
        }
    }
}

impl fmt::Display for WizardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A complete wizard run, referencing records by name
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WizardScript {
    pub wizard: WizardKind,
    /// Project name
    pub project: String,
    /// Block name used as the unit cursor
    pub block: Option<String>,
    /// Floor name within `block`
    pub floor: Option<String>,
    /// Unit numbers
    #[serde(default)]
    pub units: Vec<String>,
    /// House numbers
    #[serde(default)]
    pub houses: Vec<String>,
    /// Buyer or tenant emails
    #[serde(default, alias = "tenants")]
    pub buyers: Vec<String>,
    /// Ownership percentage per buyer email; unlisted buyers keep the even split
    #[serde(default)]
    pub shares: BTreeMap<String, u32>,
    /// Owner name (contracts)
    pub owner: Option<String>,
    /// Agent name (property sales)
    pub agent: Option<String>,
    #[serde(default)]
    pub terms: ScriptTerms,
}

/// Free-text terms, parsed by the wizard exactly as if typed into the form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptTerms {
    pub commission_type: Option<CommissionType>,
    pub commission: Option<String>,
    pub list_price: Option<String>,
    pub sale_price: Option<String>,
    pub offer_price: Option<String>,
    /// Payment plan template name
    pub template: Option<String>,
    pub installments: Option<u32>,
    pub down_payment: Option<String>,
    pub contract_date: Option<String>,
    pub issue_date: Option<String>,
    pub valid_until: Option<String>,
    pub notes: Option<String>,
    /// Email of the primary tenant
    pub primary_tenant: Option<String>,
    pub lease_start: Option<String>,
    pub lease_end: Option<String>,
    pub monthly_rent: Option<String>,
    pub security_deposit: Option<String>,
    pub rent_due_day: Option<u32>,
}

impl WizardScript {
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let text = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Number of properties the script names
    pub fn property_count(&self) -> usize {
        self.units.len() + self.houses.len()
    }
}
