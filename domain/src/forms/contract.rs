//! Sales contract wizard
//!
//! Steps: project → property → parties → contract terms → review.
//! A contract covers exactly one unit or house. Submits through the
//! `createContract` action.

use super::picker::{PropertyArity, PropertyPicker};
use super::plan::PlanFields;
use super::{co_ownership_issues, parse_date};
use crate::commercial::terms::PaymentPlanTemplate;
use crate::core::ids::{BlockId, BuyerId, FloorId, OwnerId, ProjectId, TemplateId};
use crate::core::money::Money;
use crate::core::percentage::Percentage;
use crate::ownership::CoOwnership;
use crate::party::entities::{Buyer, Owner};
use crate::property::entities::{House, Project, PropertyKind, Unit};
use crate::wizard::engine::StepDefinition;
use crate::wizard::form::{FieldError, ValidationErrors, WizardForm};
use chrono::NaiveDate;
use serde::Serialize;

const ARITY: PropertyArity = PropertyArity::ExactlyOne;

/// One field update of the contract form
#[derive(Debug, Clone)]
pub enum ContractField {
    Project(Project),
    Block(Option<BlockId>),
    Floor(Option<FloorId>),
    /// Replaces any previously chosen property
    Unit(Unit),
    /// Replaces any previously chosen property
    House(House),
    Owner(Option<Owner>),
    AddBuyer(Buyer),
    RemoveBuyer(BuyerId),
    BuyerShare(BuyerId, u32),
    /// `YYYY-MM-DD`
    ContractDate(String),
    /// Raw currency text
    SalePrice(String),
    PaymentPlanTemplate(PaymentPlanTemplate),
    InstallmentCount(u32),
    DownPaymentPercentage(String),
}

/// Form state of the contract wizard
#[derive(Debug, Clone, Default)]
pub struct ContractForm {
    pub picker: PropertyPicker,
    pub owner: Option<Owner>,
    pub buyers: CoOwnership,
    pub contract_date: Option<NaiveDate>,
    sale_price: Option<Money>,
    pub plan: PlanFields,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractBuyer {
    pub buyer_id: BuyerId,
    pub ownership_percentage: u32,
}

/// Body of the `createContract` action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractPayload {
    pub project_id: ProjectId,
    pub property_type: PropertyKind,
    pub property_id: u64,
    pub owner_id: Option<OwnerId>,
    pub buyers: Vec<ContractBuyer>,
    pub contract_date: NaiveDate,
    pub sale_price: Money,
    pub payment_plan_template_id: Option<TemplateId>,
    pub installment_count: u32,
    pub down_payment_percentage: Percentage,
}

impl ContractForm {
    /// Typed sale price, or the chosen property's listed price
    pub fn sale_price(&self) -> Money {
        self.sale_price
            .unwrap_or_else(|| self.picker.selected_price())
    }

    fn terms_issues(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.contract_date.is_none() {
            errors.push(FieldError::required("contract_date"));
        }
        if self.sale_price().is_zero() {
            errors.push(FieldError::new("sale_price", "must be greater than zero"));
        }
        errors.extend(self.plan.issues());
        errors
    }
}

impl WizardForm for ContractForm {
    type Field = ContractField;
    type Payload = ContractPayload;
    const NAME: &'static str = "contract";

    fn steps() -> Vec<StepDefinition<Self>> {
        vec![
            StepDefinition::new("project", "Select project", |f: &Self| f.picker.project_issues()),
            StepDefinition::new("property", "Select property", |f: &Self| {
                f.picker.property_issues(ARITY)
            }),
            StepDefinition::new("parties", "Owner and buyers", |f: &Self| {
                co_ownership_issues(&f.buyers)
            }),
            StepDefinition::new("terms", "Contract terms", |f: &Self| f.terms_issues()),
            StepDefinition::open("review", "Review"),
        ]
    }

    fn set_value(&mut self, field: ContractField) -> Result<(), FieldError> {
        match field {
            ContractField::Project(project) => self.picker.select_project(project),
            ContractField::Block(block) => self.picker.select_block(block)?,
            ContractField::Floor(floor) => self.picker.select_floor(floor)?,
            ContractField::Unit(unit) => self.picker.add_unit(unit, ARITY)?,
            ContractField::House(house) => self.picker.add_house(house, ARITY)?,
            ContractField::Owner(owner) => self.owner = owner,
            ContractField::AddBuyer(buyer) => {
                self.buyers.add(buyer);
            }
            ContractField::RemoveBuyer(id) => {
                self.buyers.remove(id);
            }
            ContractField::BuyerShare(id, percentage) => self
                .buyers
                .set_percentage(id, percentage)
                .map_err(|e| FieldError::new("buyers", e.to_string()))?,
            ContractField::ContractDate(raw) => {
                self.contract_date = Some(parse_date("contract_date", &raw)?);
            }
            ContractField::SalePrice(raw) => {
                let price = Money::parse(&raw)
                    .map_err(|e| FieldError::new("sale_price", e.to_string()))?;
                self.sale_price = Some(price);
            }
            ContractField::PaymentPlanTemplate(template) => self.plan.apply_template(&template),
            ContractField::InstallmentCount(count) => self.plan.set_installment_count(count)?,
            ContractField::DownPaymentPercentage(raw) => self.plan.set_down_payment(&raw)?,
        }
        Ok(())
    }

    fn validate(&self) -> Vec<FieldError> {
        let mut errors = self.picker.project_issues();
        errors.extend(self.picker.property_issues(ARITY));
        errors.extend(co_ownership_issues(&self.buyers));
        errors.extend(self.terms_issues());
        errors
    }

    fn to_payload(&self) -> Result<ContractPayload, ValidationErrors> {
        ValidationErrors::check(self.validate())?;
        let project = self
            .picker
            .project()
            .ok_or_else(|| FieldError::required("project"))?;
        let property = self
            .picker
            .selected()
            .first()
            .copied()
            .ok_or_else(|| FieldError::required("property"))?;
        let contract_date = self
            .contract_date
            .ok_or_else(|| FieldError::required("contract_date"))?;
        let terms = self.plan.terms();

        Ok(ContractPayload {
            project_id: project.id,
            property_type: property.kind(),
            property_id: property.raw_id(),
            owner_id: self.owner.as_ref().map(|o| o.id),
            buyers: self
                .buyers
                .shares()
                .iter()
                .map(|s| ContractBuyer {
                    buyer_id: s.buyer.id,
                    ownership_percentage: s.percentage,
                })
                .collect(),
            contract_date,
            sale_price: self.sale_price(),
            payment_plan_template_id: terms.template_id,
            installment_count: terms.installment_count.unwrap_or_default(),
            down_payment_percentage: terms.down_payment_percentage.unwrap_or_default(),
        })
    }

    fn project(&self) -> Option<&Project> {
        self.picker.project()
    }
}
