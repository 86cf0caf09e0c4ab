//! Property sale wizard (assign buyers to units or houses)
//!
//! Steps: project → properties → buyers → commercial terms → review.
//! Submits through the `createPropertySale` action.

use super::co_ownership_issues;
use super::picker::{PropertyArity, PropertyPicker};
use super::plan::PlanFields;
use crate::commercial::terms::{AgentCommission, CommissionType, PaymentPlanTemplate};
use crate::core::ids::{AgentId, BlockId, BuyerId, FloorId, HouseId, ProjectId, TemplateId, UnitId};
use crate::core::money::Money;
use crate::core::percentage::Percentage;
use crate::ownership::CoOwnership;
use crate::party::entities::{Agent, Buyer};
use crate::property::entities::{House, Project, PropertyKind, Unit};
use crate::wizard::engine::StepDefinition;
use crate::wizard::form::{FieldError, ValidationErrors, WizardForm};
use serde::Serialize;

/// One field update of the property sale form
#[derive(Debug, Clone)]
pub enum PropertySaleField {
    Project(Project),
    Block(Option<BlockId>),
    Floor(Option<FloorId>),
    AddUnit(Unit),
    RemoveUnit(UnitId),
    AddHouse(House),
    RemoveHouse(HouseId),
    AddBuyer(Buyer),
    RemoveBuyer(BuyerId),
    BuyerShare(BuyerId, u32),
    Agent(Option<Agent>),
    CommissionType(CommissionType),
    /// Raw commission text, read according to the commission type
    CommissionValue(String),
    /// Raw currency text
    ListPrice(String),
    PaymentPlanTemplate(PaymentPlanTemplate),
    InstallmentCount(u32),
    /// Raw percentage text
    DownPaymentPercentage(String),
}

/// Form state of the property sale wizard
#[derive(Debug, Clone, Default)]
pub struct PropertySaleForm {
    pub picker: PropertyPicker,
    pub buyers: CoOwnership,
    pub agent: Option<Agent>,
    pub commission_type: CommissionType,
    commission_raw: Option<String>,
    pub commission: Option<AgentCommission>,
    list_price: Option<Money>,
    pub plan: PlanFields,
}

/// One property/buyer combination with the buyer's share
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyBuyerPair {
    pub property_type: PropertyKind,
    pub property_id: u64,
    pub buyer_id: BuyerId,
    pub ownership_percentage: u32,
}

/// Body of the `createPropertySale` action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySalePayload {
    pub project_id: ProjectId,
    pub property_buyer_pairs: Vec<PropertyBuyerPair>,
    pub agent_id: Option<AgentId>,
    pub agent_commission_type: Option<CommissionType>,
    pub agent_commission_value: Option<f64>,
    pub list_price: Money,
    pub payment_plan_template_id: Option<TemplateId>,
    pub installment_count: u32,
    pub down_payment_percentage: Percentage,
}

impl PropertySaleForm {
    /// Typed list price, or the total of the selected properties' prices
    pub fn list_price(&self) -> Money {
        self.list_price
            .unwrap_or_else(|| self.picker.selected_price())
    }

    fn parse_commission(&mut self) -> Result<(), FieldError> {
        self.commission = None;
        let Some(raw) = self.commission_raw.as_deref() else {
            return Ok(());
        };
        let commission = AgentCommission::parse(self.commission_type, raw)
            .map_err(|e| FieldError::new("agent_commission_value", e.to_string()))?;
        self.commission = Some(commission);
        Ok(())
    }

    fn terms_issues(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.list_price().is_zero() {
            errors.push(FieldError::new("list_price", "must be greater than zero"));
        }
        if self.agent.is_some() && self.commission.is_none() {
            errors.push(FieldError::required("agent_commission_value"));
        }
        errors.extend(self.plan.issues());
        errors
    }
}

impl WizardForm for PropertySaleForm {
    type Field = PropertySaleField;
    type Payload = PropertySalePayload;
    const NAME: &'static str = "property-sale";

    fn steps() -> Vec<StepDefinition<Self>> {
        vec![
            StepDefinition::new("project", "Select project", |f: &Self| f.picker.project_issues()),
            StepDefinition::new("properties", "Select properties", |f: &Self| {
                f.picker.property_issues(PropertyArity::AtLeastOne)
            }),
            StepDefinition::new("buyers", "Select buyers", |f: &Self| {
                co_ownership_issues(&f.buyers)
            }),
            StepDefinition::new("terms", "Commercial terms", |f: &Self| f.terms_issues()),
            StepDefinition::open("review", "Review"),
        ]
    }

    fn set_value(&mut self, field: PropertySaleField) -> Result<(), FieldError> {
        let arity = PropertyArity::AtLeastOne;
        match field {
            PropertySaleField::Project(project) => self.picker.select_project(project),
            PropertySaleField::Block(block) => self.picker.select_block(block)?,
            PropertySaleField::Floor(floor) => self.picker.select_floor(floor)?,
            PropertySaleField::AddUnit(unit) => self.picker.add_unit(unit, arity)?,
            PropertySaleField::RemoveUnit(id) => {
                self.picker.remove_unit(id);
            }
            PropertySaleField::AddHouse(house) => self.picker.add_house(house, arity)?,
            PropertySaleField::RemoveHouse(id) => {
                self.picker.remove_house(id);
            }
            PropertySaleField::AddBuyer(buyer) => {
                self.buyers.add(buyer);
            }
            PropertySaleField::RemoveBuyer(id) => {
                self.buyers.remove(id);
            }
            PropertySaleField::BuyerShare(id, percentage) => self
                .buyers
                .set_percentage(id, percentage)
                .map_err(|e| FieldError::new("buyers", e.to_string()))?,
            PropertySaleField::Agent(agent) => {
                if agent.is_none() {
                    self.commission_raw = None;
                    self.commission = None;
                }
                self.agent = agent;
            }
            PropertySaleField::CommissionType(kind) => {
                self.commission_type = kind;
                self.parse_commission()?;
            }
            PropertySaleField::CommissionValue(raw) => {
                self.commission_raw = Some(raw);
                self.parse_commission()?;
            }
            PropertySaleField::ListPrice(raw) => {
                let price = Money::parse(&raw)
                    .map_err(|e| FieldError::new("list_price", e.to_string()))?;
                self.list_price = Some(price);
            }
            PropertySaleField::PaymentPlanTemplate(template) => self.plan.apply_template(&template),
            PropertySaleField::InstallmentCount(count) => self.plan.set_installment_count(count)?,
            PropertySaleField::DownPaymentPercentage(raw) => self.plan.set_down_payment(&raw)?,
        }
        Ok(())
    }

    fn validate(&self) -> Vec<FieldError> {
        let mut errors = self.picker.project_issues();
        errors.extend(self.picker.property_issues(PropertyArity::AtLeastOne));
        errors.extend(co_ownership_issues(&self.buyers));
        errors.extend(self.terms_issues());
        errors
    }

    fn to_payload(&self) -> Result<PropertySalePayload, ValidationErrors> {
        ValidationErrors::check(self.validate())?;
        let project = self
            .picker
            .project()
            .ok_or_else(|| FieldError::required("project"))?;
        let terms = self.plan.terms();

        let property_buyer_pairs = self
            .picker
            .selected()
            .into_iter()
            .flat_map(|property| {
                self.buyers.shares().iter().map(move |share| PropertyBuyerPair {
                    property_type: property.kind(),
                    property_id: property.raw_id(),
                    buyer_id: share.buyer.id,
                    ownership_percentage: share.percentage,
                })
            })
            .collect();

        let commission = self.agent.as_ref().and(self.commission);

        Ok(PropertySalePayload {
            project_id: project.id,
            property_buyer_pairs,
            agent_id: self.agent.as_ref().map(|a| a.id),
            agent_commission_type: commission.map(|c| c.commission_type()),
            agent_commission_value: commission.map(|c| c.value()),
            list_price: self.list_price(),
            payment_plan_template_id: terms.template_id,
            installment_count: terms.installment_count.unwrap_or_default(),
            down_payment_percentage: terms.down_payment_percentage.unwrap_or_default(),
        })
    }

    fn project(&self) -> Option<&Project> {
        self.picker.project()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::entities::PropertyStatus;
    use crate::wizard::engine::{Wizard, WizardError};
    use serde_json::json;

    fn unit(id: u64, price: i64) -> Unit {
        Unit {
            id: UnitId(id),
            number: format!("A-{}", id),
            unit_type: "2BHK".to_string(),
            size: 1100.0,
            price: Money::from_units(price),
            status: PropertyStatus::Available,
        }
    }

    fn agent() -> Agent {
        Agent {
            id: AgentId(8),
            name: "Sam Realtor".to_string(),
            email: "sam@agency.test".to_string(),
            phone: String::new(),
            agency: None,
        }
    }

    fn filled_wizard() -> Wizard<PropertySaleForm> {
        let mut wizard = Wizard::<PropertySaleForm>::new().unwrap();
        wizard
            .set_value(PropertySaleField::Project(Project::new(3, "Palm").with_blocks()))
            .unwrap();
        wizard.next().unwrap();

        wizard.set_value(PropertySaleField::Block(Some(BlockId(1)))).unwrap();
        wizard.set_value(PropertySaleField::AddUnit(unit(101, 250_000))).unwrap();
        wizard.set_value(PropertySaleField::AddUnit(unit(102, 150_000))).unwrap();
        wizard.next().unwrap();

        wizard
            .set_value(PropertySaleField::AddBuyer(Buyer::new(5, "Ana", "ana@x.test")))
            .unwrap();
        wizard
            .set_value(PropertySaleField::AddBuyer(Buyer::new(6, "Ben", "ben@x.test")))
            .unwrap();
        wizard
            .set_value(PropertySaleField::AddBuyer(Buyer::new(7, "Cy", "cy@x.test")))
            .unwrap();
        wizard.next().unwrap();
        wizard
    }

    #[test]
    fn test_buyer_step_requires_a_buyer() {
        let mut wizard = Wizard::<PropertySaleForm>::new().unwrap();
        wizard
            .set_value(PropertySaleField::Project(Project::new(3, "Palm").with_blocks()))
            .unwrap();
        wizard.next().unwrap();
        wizard.set_value(PropertySaleField::AddUnit(unit(1, 10))).unwrap();
        wizard.next().unwrap();

        let err = wizard.next().unwrap_err();
        assert!(matches!(err, WizardError::StepIncomplete { step: 3, .. }));
        assert_eq!(wizard.current_step(), 3);
    }

    #[test]
    fn test_unbalanced_shares_block_navigation() {
        let mut wizard = filled_wizard();
        assert!(wizard.previous());
        wizard
            .set_value(PropertySaleField::BuyerShare(BuyerId(5), 50))
            .unwrap();
        assert_eq!(wizard.form().buyers.total_percentage(), 116);
        assert!(!wizard.can_advance());

        wizard
            .set_value(PropertySaleField::RemoveBuyer(BuyerId(7)))
            .unwrap();
        assert_eq!(wizard.form().buyers.total_percentage(), 100);
        assert!(wizard.can_advance());
    }

    #[test]
    fn test_list_price_defaults_to_selected_total() {
        let wizard = filled_wizard();
        assert_eq!(wizard.form().list_price(), Money::from_units(400_000));
    }

    #[test]
    fn test_invalid_list_price_is_field_error() {
        let mut wizard = filled_wizard();
        let err = wizard
            .set_value(PropertySaleField::ListPrice("twelve".to_string()))
            .unwrap_err();
        assert_eq!(err.field, "list_price");
    }

    #[test]
    fn test_agent_requires_commission() {
        let mut wizard = filled_wizard();
        wizard
            .set_value(PropertySaleField::DownPaymentPercentage("20".into()))
            .unwrap();
        wizard.set_value(PropertySaleField::InstallmentCount(12)).unwrap();
        wizard.set_value(PropertySaleField::Agent(Some(agent()))).unwrap();
        assert!(!wizard.can_advance());

        wizard
            .set_value(PropertySaleField::CommissionValue("2.5".into()))
            .unwrap();
        assert!(wizard.can_advance());

        // 250 is rejected as a percentage but reads fine as a fixed amount
        wizard
            .set_value(PropertySaleField::CommissionValue("250".into()))
            .unwrap_err();
        assert!(wizard.form().commission.is_none());
        wizard
            .set_value(PropertySaleField::CommissionType(CommissionType::Fixed))
            .unwrap();
        assert_eq!(
            wizard.form().commission,
            Some(AgentCommission::Fixed(Money::from_units(250)))
        );
    }

    #[test]
    fn test_payload_matches_action_shape() {
        let mut wizard = filled_wizard();
        wizard
            .set_value(PropertySaleField::ListPrice("$400,000".into()))
            .unwrap();
        wizard.set_value(PropertySaleField::Agent(Some(agent()))).unwrap();
        wizard
            .set_value(PropertySaleField::CommissionValue("2.5%".into()))
            .unwrap();
        wizard
            .set_value(PropertySaleField::PaymentPlanTemplate(PaymentPlanTemplate {
                id: TemplateId(4),
                name: "Standard 24".to_string(),
                installment_count: 24,
                down_payment_percentage: Percentage::from_whole(20).unwrap(),
                frequency: Default::default(),
            }))
            .unwrap();
        wizard.next().unwrap();

        let payload = serde_json::to_value(wizard.submit().unwrap()).unwrap();
        let pair = |unit: u64, buyer: u64, pct: u32| {
            json!({
                "property_type": "unit",
                "property_id": unit,
                "buyer_id": buyer,
                "ownership_percentage": pct
            })
        };
        assert_eq!(
            payload,
            json!({
                "project_id": 3,
                "property_buyer_pairs": [
                    pair(101, 5, 34), pair(101, 6, 33), pair(101, 7, 33),
                    pair(102, 5, 34), pair(102, 6, 33), pair(102, 7, 33)
                ],
                "agent_id": 8,
                "agent_commission_type": "percentage",
                "agent_commission_value": 2.5,
                "list_price": 400000.0,
                "payment_plan_template_id": 4,
                "installment_count": 24,
                "down_payment_percentage": 20.0
            })
        );
        assert_eq!(payload.as_object().unwrap().len(), 9);
    }

    #[test]
    fn test_payload_without_agent_has_null_commission() {
        let mut wizard = filled_wizard();
        wizard
            .set_value(PropertySaleField::DownPaymentPercentage("100".into()))
            .unwrap();
        wizard.set_value(PropertySaleField::InstallmentCount(0)).unwrap();
        wizard.next().unwrap();

        let payload = wizard.submit().unwrap();
        assert_eq!(payload.agent_id, None);
        assert_eq!(payload.agent_commission_type, None);
        assert_eq!(payload.agent_commission_value, None);
        assert_eq!(payload.payment_plan_template_id, None);
    }

    #[test]
    fn test_remove_unit_keeps_others() {
        let mut wizard = filled_wizard();
        wizard.go_to(2).unwrap();
        wizard.set_value(PropertySaleField::RemoveUnit(UnitId(101))).unwrap();
        assert_eq!(wizard.form().picker.units().keys(), vec![UnitId(102)]);
        wizard.set_value(PropertySaleField::RemoveUnit(UnitId(101))).unwrap();
        assert_eq!(wizard.form().picker.units().keys(), vec![UnitId(102)]);
    }
}
