//! Tenant assignment wizard
//!
//! Steps: project → property → tenants → lease terms → review.
//! Leases a single unit or house to one or more tenant users, one of whom
//! is the primary contact. Submits through `createTenantAssignment`.

use super::parse_date;
use super::picker::{PropertyArity, PropertyPicker};
use crate::core::ids::{BlockId, BuyerId, FloorId, ProjectId};
use crate::core::money::Money;
use crate::party::entities::TenantUser;
use crate::property::entities::{House, Project, PropertyKind, Unit};
use crate::wizard::engine::StepDefinition;
use crate::wizard::form::{FieldError, ValidationErrors, WizardForm};
use crate::wizard::selection::SelectionList;
use chrono::{Months, NaiveDate};
use serde::Serialize;

const ARITY: PropertyArity = PropertyArity::ExactlyOne;
/// Rent can fall due on any day that exists in every month
pub const MAX_RENT_DUE_DAY: u32 = 28;

#[derive(Debug, Clone)]
pub enum TenantAssignmentField {
    Project(Project),
    Block(Option<BlockId>),
    Floor(Option<FloorId>),
    Unit(Unit),
    House(House),
    AddTenant(TenantUser),
    RemoveTenant(BuyerId),
    PrimaryTenant(BuyerId),
    LeaseStart(String),
    LeaseEnd(String),
    MonthlyRent(String),
    SecurityDeposit(String),
    RentDueDay(u32),
}

/// Form state of the tenant assignment wizard
#[derive(Debug, Clone, Default)]
pub struct TenantAssignmentForm {
    pub picker: PropertyPicker,
    pub tenants: SelectionList<TenantUser>,
    primary_tenant: Option<BuyerId>,
    pub lease_start: Option<NaiveDate>,
    pub lease_end: Option<NaiveDate>,
    pub monthly_rent: Option<Money>,
    pub security_deposit: Money,
    pub rent_due_day: Option<u32>,
}

/// Body of the `createTenantAssignment` action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TenantAssignmentPayload {
    pub project_id: ProjectId,
    pub property_type: PropertyKind,
    pub property_id: u64,
    pub tenant_ids: Vec<BuyerId>,
    pub primary_tenant_id: BuyerId,
    pub lease_start: NaiveDate,
    pub lease_end: NaiveDate,
    pub monthly_rent: Money,
    pub security_deposit: Money,
    pub rent_due_day: u32,
}

impl TenantAssignmentForm {
    /// Explicit primary tenant, or the first one selected
    pub fn primary_tenant(&self) -> Option<BuyerId> {
        self.primary_tenant
            .filter(|id| self.tenants.contains(*id))
            .or_else(|| self.tenants.keys().first().copied())
    }

    /// Whole months covered by the lease, when both dates are set
    pub fn lease_months(&self) -> Option<u32> {
        let start = self.lease_start?;
        let end = self.lease_end?;
        let mut months = 0;
        while let Some(next) = start.checked_add_months(Months::new(months + 1)) {
            if next > end {
                break;
            }
            months += 1;
        }
        Some(months)
    }

    fn tenant_issues(&self) -> Vec<FieldError> {
        if self.tenants.is_empty() {
            vec![FieldError::new("tenants", "select at least one tenant")]
        } else {
            Vec::new()
        }
    }

    fn lease_issues(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        match (self.lease_start, self.lease_end) {
            (None, _) => errors.push(FieldError::required("lease_start")),
            (_, None) => errors.push(FieldError::required("lease_end")),
            (Some(start), Some(end)) if end <= start => {
                errors.push(FieldError::new("lease_end", "must be after the lease start"))
            }
            _ => {}
        }
        match self.monthly_rent {
            None => errors.push(FieldError::required("monthly_rent")),
            Some(rent) if rent.is_zero() => {
                errors.push(FieldError::new("monthly_rent", "must be greater than zero"))
            }
            Some(_) => {}
        }
        if self.rent_due_day.is_none() {
            errors.push(FieldError::required("rent_due_day"));
        }
        errors
    }
}

impl WizardForm for TenantAssignmentForm {
    type Field = TenantAssignmentField;
    type Payload = TenantAssignmentPayload;
    const NAME: &'static str = "tenant-assignment";

    fn steps() -> Vec<StepDefinition<Self>> {
        vec![
            StepDefinition::new("project", "Select project", |f: &Self| f.picker.project_issues()),
            StepDefinition::new("property", "Select property", |f: &Self| {
                f.picker.property_issues(ARITY)
            }),
            StepDefinition::new("tenants", "Select tenants", |f: &Self| f.tenant_issues()),
            StepDefinition::new("lease", "Lease terms", |f: &Self| f.lease_issues()),
            StepDefinition::open("review", "Review"),
        ]
    }

    fn set_value(&mut self, field: TenantAssignmentField) -> Result<(), FieldError> {
        match field {
            TenantAssignmentField::Project(project) => self.picker.select_project(project),
            TenantAssignmentField::Block(block) => self.picker.select_block(block)?,
            TenantAssignmentField::Floor(floor) => self.picker.select_floor(floor)?,
            TenantAssignmentField::Unit(unit) => self.picker.add_unit(unit, ARITY)?,
            TenantAssignmentField::House(house) => self.picker.add_house(house, ARITY)?,
            TenantAssignmentField::AddTenant(tenant) => {
                self.tenants.add(tenant);
            }
            TenantAssignmentField::RemoveTenant(id) => {
                self.tenants.remove(id);
                if self.primary_tenant == Some(id) {
                    self.primary_tenant = None;
                }
            }
            TenantAssignmentField::PrimaryTenant(id) => {
                if !self.tenants.contains(id) {
                    return Err(FieldError::new(
                        "primary_tenant_id",
                        format!("tenant {} is not selected", id),
                    ));
                }
                self.primary_tenant = Some(id);
            }
            TenantAssignmentField::LeaseStart(raw) => {
                self.lease_start = Some(parse_date("lease_start", &raw)?);
            }
            TenantAssignmentField::LeaseEnd(raw) => {
                self.lease_end = Some(parse_date("lease_end", &raw)?);
            }
            TenantAssignmentField::MonthlyRent(raw) => {
                let rent = Money::parse(&raw)
                    .map_err(|e| FieldError::new("monthly_rent", e.to_string()))?;
                self.monthly_rent = Some(rent);
            }
            TenantAssignmentField::SecurityDeposit(raw) => {
                self.security_deposit = Money::parse(&raw)
                    .map_err(|e| FieldError::new("security_deposit", e.to_string()))?;
            }
            TenantAssignmentField::RentDueDay(day) => {
                if !(1..=MAX_RENT_DUE_DAY).contains(&day) {
                    return Err(FieldError::new(
                        "rent_due_day",
                        format!("must be between 1 and {}", MAX_RENT_DUE_DAY),
                    ));
                }
                self.rent_due_day = Some(day);
            }
        }
        Ok(())
    }

    fn validate(&self) -> Vec<FieldError> {
        let mut errors = self.picker.project_issues();
        errors.extend(self.picker.property_issues(ARITY));
        errors.extend(self.tenant_issues());
        errors.extend(self.lease_issues());
        errors
    }

    fn to_payload(&self) -> Result<TenantAssignmentPayload, ValidationErrors> {
        ValidationErrors::check(self.validate())?;
        let missing = |field| ValidationErrors::from(FieldError::required(field));
        let project = self.picker.project().ok_or_else(|| missing("project"))?;
        let property = self
            .picker
            .selected()
            .first()
            .copied()
            .ok_or_else(|| missing("property"))?;

        Ok(TenantAssignmentPayload {
            project_id: project.id,
            property_type: property.kind(),
            property_id: property.raw_id(),
            tenant_ids: self.tenants.keys(),
            primary_tenant_id: self.primary_tenant().ok_or_else(|| missing("tenants"))?,
            lease_start: self.lease_start.ok_or_else(|| missing("lease_start"))?,
            lease_end: self.lease_end.ok_or_else(|| missing("lease_end"))?,
            monthly_rent: self.monthly_rent.ok_or_else(|| missing("monthly_rent"))?,
            security_deposit: self.security_deposit,
            rent_due_day: self.rent_due_day.ok_or_else(|| missing("rent_due_day"))?,
        })
    }

    fn project(&self) -> Option<&Project> {
        self.picker.project()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::UnitId;
    use crate::party::entities::Buyer;
    use crate::property::entities::PropertyStatus;
    use crate::wizard::engine::Wizard;
    use serde_json::json;

    fn unit(id: u64, status: PropertyStatus) -> Unit {
        Unit {
            id: UnitId(id),
            number: format!("C-{}", id),
            unit_type: "1BHK".to_string(),
            size: 650.0,
            price: Money::from_units(90_000),
            status,
        }
    }

    fn at_lease() -> Wizard<TenantAssignmentForm> {
        let mut wizard = Wizard::<TenantAssignmentForm>::new().unwrap();
        wizard
            .set_value(TenantAssignmentField::Project(
                Project::new(6, "Harbor Court").with_blocks(),
            ))
            .unwrap();
        wizard.next().unwrap();
        wizard
            .set_value(TenantAssignmentField::Unit(unit(31, PropertyStatus::Available)))
            .unwrap();
        wizard.next().unwrap();
        wizard
            .set_value(TenantAssignmentField::AddTenant(Buyer::new(7, "Tia", "tia@x.test")))
            .unwrap();
        wizard
            .set_value(TenantAssignmentField::AddTenant(Buyer::new(9, "Raj", "raj@x.test")))
            .unwrap();
        wizard.next().unwrap();
        wizard
    }

    #[test]
    fn test_primary_tenant_defaults_to_first() {
        let mut wizard = at_lease();
        assert_eq!(wizard.form().primary_tenant(), Some(BuyerId(7)));

        wizard
            .set_value(TenantAssignmentField::PrimaryTenant(BuyerId(9)))
            .unwrap();
        assert_eq!(wizard.form().primary_tenant(), Some(BuyerId(9)));

        wizard
            .set_value(TenantAssignmentField::RemoveTenant(BuyerId(9)))
            .unwrap();
        assert_eq!(wizard.form().primary_tenant(), Some(BuyerId(7)));

        assert!(wizard
            .set_value(TenantAssignmentField::PrimaryTenant(BuyerId(42)))
            .is_err());
    }

    #[test]
    fn test_rent_due_day_range() {
        let mut wizard = at_lease();
        assert!(wizard.set_value(TenantAssignmentField::RentDueDay(0)).is_err());
        assert!(wizard.set_value(TenantAssignmentField::RentDueDay(31)).is_err());
        wizard.set_value(TenantAssignmentField::RentDueDay(28)).unwrap();
    }

    #[test]
    fn test_booked_unit_cannot_be_leased() {
        let mut wizard = Wizard::<TenantAssignmentForm>::new().unwrap();
        wizard
            .set_value(TenantAssignmentField::Project(Project::new(6, "Harbor Court").with_blocks()))
            .unwrap();
        let err = wizard
            .set_value(TenantAssignmentField::Unit(unit(2, PropertyStatus::Booked)))
            .unwrap_err();
        assert_eq!(err.field, "units");
    }

    #[test]
    fn test_lease_gate_and_payload() {
        let mut wizard = at_lease();
        wizard
            .set_value(TenantAssignmentField::LeaseStart("2026-11-01".into()))
            .unwrap();
        wizard
            .set_value(TenantAssignmentField::LeaseEnd("2026-10-01".into()))
            .unwrap();
        wizard
            .set_value(TenantAssignmentField::MonthlyRent("1,200".into()))
            .unwrap();
        wizard.set_value(TenantAssignmentField::RentDueDay(5)).unwrap();
        assert!(matches!(
            wizard.next(),
            Err(crate::wizard::engine::WizardError::StepIncomplete { .. })
        ));

        wizard
            .set_value(TenantAssignmentField::LeaseEnd("2027-10-31".into()))
            .unwrap();
        wizard
            .set_value(TenantAssignmentField::SecurityDeposit("2400".into()))
            .unwrap();
        wizard.next().unwrap();
        assert_eq!(wizard.form().lease_months(), Some(11));

        let payload = serde_json::to_value(wizard.submit().unwrap()).unwrap();
        assert_eq!(
            payload,
            json!({
                "project_id": 6,
                "property_type": "unit",
                "property_id": 31,
                "tenant_ids": [7, 9],
                "primary_tenant_id": 7,
                "lease_start": "2026-11-01",
                "lease_end": "2027-10-31",
                "monthly_rent": 1200.0,
                "security_deposit": 2400.0,
                "rent_due_day": 5
            })
        );
    }
}
