//! Payment plan fields shared by sale, contract and offer letter forms

use crate::commercial::schedule::PaymentSchedule;
use crate::commercial::terms::{PaymentPlanTemplate, PaymentPlanTerms, PlanFrequency};
use crate::core::money::Money;
use crate::core::percentage::Percentage;
use crate::wizard::form::FieldError;

const MAX_INSTALLMENTS: u32 = 360;

/// Template choice, installment count and down payment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanFields {
    terms: PaymentPlanTerms,
    frequency: PlanFrequency,
}

impl PlanFields {
    pub fn terms(&self) -> &PaymentPlanTerms {
        &self.terms
    }

    pub fn apply_template(&mut self, template: &PaymentPlanTemplate) {
        self.terms.apply_template(template);
        self.frequency = template.frequency;
    }

    pub fn set_installment_count(&mut self, count: u32) -> Result<(), FieldError> {
        if count > MAX_INSTALLMENTS {
            return Err(FieldError::new(
                "installment_count",
                format!("must be at most {}", MAX_INSTALLMENTS),
            ));
        }
        self.terms.installment_count = Some(count);
        Ok(())
    }

    pub fn set_down_payment(&mut self, raw: &str) -> Result<(), FieldError> {
        let percentage = Percentage::parse(raw)
            .map_err(|e| FieldError::new("down_payment_percentage", e.to_string()))?;
        self.terms.down_payment_percentage = Some(percentage);
        Ok(())
    }

    pub fn issues(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        match self.terms.down_payment_percentage {
            None => errors.push(FieldError::required("down_payment_percentage")),
            Some(down) => match self.terms.installment_count {
                None => errors.push(FieldError::required("installment_count")),
                Some(0) if down != Percentage::FULL => errors.push(FieldError::new(
                    "installment_count",
                    "must be at least 1 unless paid in full upfront",
                )),
                Some(_) => {}
            },
        }
        errors
    }

    /// Schedule preview for `price`, once the plan is complete
    pub fn schedule(&self, price: Money) -> Option<PaymentSchedule> {
        let down = self.terms.down_payment_percentage?;
        let count = self.terms.installment_count?;
        PaymentSchedule::build(price, down, count, self.frequency).ok()
    }
}
