//! Commission and payment plan terms

use crate::core::error::DomainError;
use crate::core::ids::TemplateId;
use crate::core::money::Money;
use crate::core::percentage::Percentage;
use serde::{Deserialize, Serialize};

/// How an agent's commission is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommissionType {
    #[default]
    Percentage,
    Fixed,
}

impl CommissionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommissionType::Percentage => "percentage",
            CommissionType::Fixed => "fixed",
        }
    }
}

impl std::fmt::Display for CommissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CommissionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "percentage" | "percent" | "%" => Ok(CommissionType::Percentage),
            "fixed" | "flat" | "amount" => Ok(CommissionType::Fixed),
            other => Err(DomainError::unknown("commission type", other)),
        }
    }
}

/// An agent commission with its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentCommission {
    Percentage(Percentage),
    Fixed(Money),
}

impl AgentCommission {
    /// Parse the raw value typed for the given commission type.
    pub fn parse(kind: CommissionType, raw: &str) -> Result<Self, DomainError> {
        match kind {
            CommissionType::Percentage => Percentage::parse(raw).map(AgentCommission::Percentage),
            CommissionType::Fixed => Money::parse(raw).map(AgentCommission::Fixed),
        }
    }

    pub fn commission_type(&self) -> CommissionType {
        match self {
            AgentCommission::Percentage(_) => CommissionType::Percentage,
            AgentCommission::Fixed(_) => CommissionType::Fixed,
        }
    }

    /// Value as sent to the backend: percent for percentages, amount for fixed.
    pub fn value(&self) -> f64 {
        match self {
            AgentCommission::Percentage(p) => p.as_f64(),
            AgentCommission::Fixed(m) => m.as_f64(),
        }
    }

    /// Commission earned on a sale at `price`
    pub fn amount_on(&self, price: Money) -> Money {
        match self {
            AgentCommission::Percentage(p) => p.of(price),
            AgentCommission::Fixed(m) => *m,
        }
    }
}

impl std::fmt::Display for AgentCommission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentCommission::Percentage(p) => write!(f, "{}", p),
            AgentCommission::Fixed(m) => write!(f, "{} flat", m),
        }
    }
}

/// Spacing between installments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanFrequency {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl PlanFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanFrequency::Monthly => "monthly",
            PlanFrequency::Quarterly => "quarterly",
            PlanFrequency::Yearly => "yearly",
        }
    }

    pub fn months(&self) -> u32 {
        match self {
            PlanFrequency::Monthly => 1,
            PlanFrequency::Quarterly => 3,
            PlanFrequency::Yearly => 12,
        }
    }
}

/// A reusable payment plan offered by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPlanTemplate {
    pub id: TemplateId,
    pub name: String,
    pub installment_count: u32,
    pub down_payment_percentage: Percentage,
    #[serde(default)]
    pub frequency: PlanFrequency,
}

/// Payment plan choices collected by a wizard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentPlanTerms {
    pub template_id: Option<TemplateId>,
    pub installment_count: Option<u32>,
    pub down_payment_percentage: Option<Percentage>,
}

impl PaymentPlanTerms {
    /// Select a template, taking its installment count and down payment as
    /// defaults for values not already typed in.
    pub fn apply_template(&mut self, template: &PaymentPlanTemplate) {
        self.template_id = Some(template.id);
        self.installment_count.get_or_insert(template.installment_count);
        self.down_payment_percentage
            .get_or_insert(template.down_payment_percentage);
    }

    pub fn is_complete(&self) -> bool {
        self.installment_count.is_some() && self.down_payment_percentage.is_some()
    }
}
