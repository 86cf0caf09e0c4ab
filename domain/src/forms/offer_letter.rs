//! Offer letter wizard
//!
//! Steps: project → properties → buyers → offer terms → review.
//! Buyers on an offer carry no ownership split. Submits through the
//! `createOfferLetter` action.

use super::parse_date;
use super::picker::{PropertyArity, PropertyPicker};
use super::plan::PlanFields;
use crate::commercial::terms::PaymentPlanTemplate;
use crate::core::ids::{BlockId, BuyerId, FloorId, HouseId, ProjectId, TemplateId, UnitId};
use crate::core::money::Money;
use crate::core::percentage::Percentage;
use crate::party::entities::Buyer;
use crate::property::entities::{House, Project, Unit};
use crate::wizard::engine::StepDefinition;
use crate::wizard::form::{FieldError, ValidationErrors, WizardForm};
use crate::wizard::selection::SelectionList;
use chrono::NaiveDate;
use serde::Serialize;

const ARITY: PropertyArity = PropertyArity::AtLeastOne;
pub const MAX_NOTES_CHARS: usize = 1000;

#[derive(Debug, Clone)]
pub enum OfferLetterField {
    Project(Project),
    Block(Option<BlockId>),
    Floor(Option<FloorId>),
    AddUnit(Unit),
    RemoveUnit(UnitId),
    AddHouse(House),
    RemoveHouse(HouseId),
    AddBuyer(Buyer),
    RemoveBuyer(BuyerId),
    OfferPrice(String),
    PaymentPlanTemplate(PaymentPlanTemplate),
    InstallmentCount(u32),
    DownPaymentPercentage(String),
    IssueDate(String),
    ValidUntil(String),
    Notes(String),
}

/// Form state of the offer letter wizard
#[derive(Debug, Clone, Default)]
pub struct OfferLetterForm {
    pub picker: PropertyPicker,
    pub buyers: SelectionList<Buyer>,
    offer_price: Option<Money>,
    pub plan: PlanFields,
    pub issue_date: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub notes: String,
}

/// Body of the `createOfferLetter` action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfferLetterPayload {
    pub project_id: ProjectId,
    pub unit_ids: Vec<UnitId>,
    pub house_ids: Vec<HouseId>,
    pub buyer_ids: Vec<BuyerId>,
    pub offer_price: Money,
    pub payment_plan_template_id: Option<TemplateId>,
    pub installment_count: u32,
    pub down_payment_percentage: Percentage,
    pub issue_date: NaiveDate,
    pub valid_until: NaiveDate,
    pub notes: Option<String>,
}

impl OfferLetterForm {
    /// Typed offer price, or the total of the selected properties' prices
    pub fn offer_price(&self) -> Money {
        self.offer_price
            .unwrap_or_else(|| self.picker.selected_price())
    }

    fn buyer_issues(&self) -> Vec<FieldError> {
        if self.buyers.is_empty() {
            vec![FieldError::new("buyers", "select at least one buyer")]
        } else {
            Vec::new()
        }
    }

    fn terms_issues(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.offer_price().is_zero() {
            errors.push(FieldError::new("offer_price", "must be greater than zero"));
        }
        errors.extend(self.plan.issues());
        match (self.issue_date, self.valid_until) {
            (None, _) => errors.push(FieldError::required("issue_date")),
            (_, None) => errors.push(FieldError::required("valid_until")),
            (Some(issued), Some(until)) if until <= issued => errors.push(FieldError::new(
                "valid_until",
                "must be after the issue date",
            )),
            _ => {}
        }
        errors
    }
}

impl WizardForm for OfferLetterForm {
    type Field = OfferLetterField;
    type Payload = OfferLetterPayload;
    const NAME: &'static str = "offer-letter";

    fn steps() -> Vec<StepDefinition<Self>> {
        vec![
            StepDefinition::new("project", "Select project", |f: &Self| f.picker.project_issues()),
            StepDefinition::new("properties", "Select properties", |f: &Self| {
                f.picker.property_issues(ARITY)
            }),
            StepDefinition::new("buyers", "Select buyers", |f: &Self| f.buyer_issues()),
            StepDefinition::new("terms", "Offer terms", |f: &Self| f.terms_issues()),
            StepDefinition::open("review", "Review"),
        ]
    }

    fn set_value(&mut self, field: OfferLetterField) -> Result<(), FieldError> {
        match field {
            OfferLetterField::Project(project) => self.picker.select_project(project),
            OfferLetterField::Block(block) => self.picker.select_block(block)?,
            OfferLetterField::Floor(floor) => self.picker.select_floor(floor)?,
            OfferLetterField::AddUnit(unit) => self.picker.add_unit(unit, ARITY)?,
            OfferLetterField::RemoveUnit(id) => {
                self.picker.remove_unit(id);
            }
            OfferLetterField::AddHouse(house) => self.picker.add_house(house, ARITY)?,
            OfferLetterField::RemoveHouse(id) => {
                self.picker.remove_house(id);
            }
            OfferLetterField::AddBuyer(buyer) => {
                self.buyers.add(buyer);
            }
            OfferLetterField::RemoveBuyer(id) => {
                self.buyers.remove(id);
            }
            OfferLetterField::OfferPrice(raw) => {
                let price = Money::parse(&raw)
                    .map_err(|e| FieldError::new("offer_price", e.to_string()))?;
                self.offer_price = Some(price);
            }
            OfferLetterField::PaymentPlanTemplate(template) => self.plan.apply_template(&template),
            OfferLetterField::InstallmentCount(count) => self.plan.set_installment_count(count)?,
            OfferLetterField::DownPaymentPercentage(raw) => self.plan.set_down_payment(&raw)?,
            OfferLetterField::IssueDate(raw) => {
                self.issue_date = Some(parse_date("issue_date", &raw)?);
            }
            OfferLetterField::ValidUntil(raw) => {
                self.valid_until = Some(parse_date("valid_until", &raw)?);
            }
            OfferLetterField::Notes(notes) => {
                let count = notes.chars().count();
                if count > MAX_NOTES_CHARS {
                    return Err(FieldError::new(
                        "notes",
                        format!("must be at most {} characters ({} given)", MAX_NOTES_CHARS, count),
                    ));
                }
                self.notes = notes;
            }
        }
        Ok(())
    }

    fn validate(&self) -> Vec<FieldError> {
        let mut errors = self.picker.project_issues();
        errors.extend(self.picker.property_issues(ARITY));
        errors.extend(self.buyer_issues());
        errors.extend(self.terms_issues());
        errors
    }

    fn to_payload(&self) -> Result<OfferLetterPayload, ValidationErrors> {
        ValidationErrors::check(self.validate())?;
        let project = self
            .picker
            .project()
            .ok_or_else(|| FieldError::required("project"))?;
        let issue_date = self
            .issue_date
            .ok_or_else(|| FieldError::required("issue_date"))?;
        let valid_until = self
            .valid_until
            .ok_or_else(|| FieldError::required("valid_until"))?;
        let terms = self.plan.terms();
        let notes = self.notes.trim();

        Ok(OfferLetterPayload {
            project_id: project.id,
            unit_ids: self.picker.units().keys(),
            house_ids: self.picker.houses().keys(),
            buyer_ids: self.buyers.keys(),
            offer_price: self.offer_price(),
            payment_plan_template_id: terms.template_id,
            installment_count: terms.installment_count.unwrap_or_default(),
            down_payment_percentage: terms.down_payment_percentage.unwrap_or_default(),
            issue_date,
            valid_until,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        })
    }

    fn project(&self) -> Option<&Project> {
        self.picker.project()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commercial::terms::PlanFrequency;
    use crate::property::entities::PropertyStatus;
    use crate::wizard::engine::Wizard;
    use serde_json::json;

    fn unit(id: u64) -> Unit {
        Unit {
            id: UnitId(id),
            number: format!("B-{}", id),
            unit_type: "studio".to_string(),
            size: 540.0,
            price: Money::from_units(80_000),
            status: PropertyStatus::Available,
        }
    }

    fn template() -> PaymentPlanTemplate {
        PaymentPlanTemplate {
            id: TemplateId(3),
            name: "Quarterly 8".to_string(),
            installment_count: 8,
            down_payment_percentage: Percentage::from_whole(15).unwrap(),
            frequency: PlanFrequency::Quarterly,
        }
    }

    fn at_terms() -> Wizard<OfferLetterForm> {
        let mut wizard = Wizard::<OfferLetterForm>::new().unwrap();
        wizard
            .set_value(OfferLetterField::Project(Project::new(2, "Skyline").with_blocks()))
            .unwrap();
        wizard.next().unwrap();
        wizard.set_value(OfferLetterField::AddUnit(unit(10))).unwrap();
        wizard.set_value(OfferLetterField::AddUnit(unit(11))).unwrap();
        wizard.next().unwrap();
        wizard
            .set_value(OfferLetterField::AddBuyer(Buyer::new(1, "Ana", "ana@x.test")))
            .unwrap();
        wizard
            .set_value(OfferLetterField::AddBuyer(Buyer::new(2, "Ben", "ben@x.test")))
            .unwrap();
        wizard.next().unwrap();
        wizard
    }

    #[test]
    fn test_validity_window_must_be_forward() {
        let mut wizard = at_terms();
        wizard
            .set_value(OfferLetterField::PaymentPlanTemplate(template()))
            .unwrap();
        wizard
            .set_value(OfferLetterField::IssueDate("2026-10-16".into()))
            .unwrap();
        wizard
            .set_value(OfferLetterField::ValidUntil("2026-10-16".into()))
            .unwrap();
        let issues = wizard.step_issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "valid_until");

        wizard
            .set_value(OfferLetterField::ValidUntil("2026-11-15".into()))
            .unwrap();
        assert!(wizard.can_advance());
    }

    #[test]
    fn test_notes_length_limited() {
        let mut wizard = at_terms();
        let err = wizard
            .set_value(OfferLetterField::Notes("x".repeat(MAX_NOTES_CHARS + 1)))
            .unwrap_err();
        assert_eq!(err.field, "notes");
        assert!(wizard.form().notes.is_empty());
    }

    #[test]
    fn test_payload_matches_action_shape() {
        let mut wizard = at_terms();
        wizard
            .set_value(OfferLetterField::PaymentPlanTemplate(template()))
            .unwrap();
        wizard
            .set_value(OfferLetterField::IssueDate("2026-10-16".into()))
            .unwrap();
        wizard
            .set_value(OfferLetterField::ValidUntil("2026-11-15".into()))
            .unwrap();
        wizard
            .set_value(OfferLetterField::Notes("  Corner units preferred ".into()))
            .unwrap();
        wizard.next().unwrap();

        let payload = serde_json::to_value(wizard.submit().unwrap()).unwrap();
        assert_eq!(
            payload,
            json!({
                "project_id": 2,
                "unit_ids": [10, 11],
                "house_ids": [],
                "buyer_ids": [1, 2],
                "offer_price": 160000.0,
                "payment_plan_template_id": 3,
                "installment_count": 8,
                "down_payment_percentage": 15.0,
                "issue_date": "2026-10-16",
                "valid_until": "2026-11-15",
                "notes": "Corner units preferred"
            })
        );
    }

    #[test]
    fn test_removing_buyer_blocks_buyer_step() {
        let mut wizard = at_terms();
        wizard.previous();
        wizard.set_value(OfferLetterField::RemoveBuyer(BuyerId(1))).unwrap();
        assert!(wizard.can_advance());
        wizard.set_value(OfferLetterField::RemoveBuyer(BuyerId(2))).unwrap();
        assert!(!wizard.can_advance());
    }
}
