//! Form state contract and field-level validation

use super::engine::StepDefinition;
use crate::property::entities::Project;
use serde::Serialize;
use std::fmt;

/// A validation failure attached to one form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn required(field: &'static str) -> Self {
        Self::new(field, "is required")
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

impl std::error::Error for FieldError {}

/// A non-empty collection of field errors
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    /// `Ok(())` when `errors` is empty
    pub fn check(errors: Vec<FieldError>) -> Result<(), ValidationErrors> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", joined)
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        ValidationErrors(vec![error])
    }
}

/// Form state shared by every step of a wizard.
///
/// Steps never get the form mutably; they go through [`WizardForm::set_value`]
/// with one field update at a time.
pub trait WizardForm: Default {
    /// One field update
    type Field: fmt::Debug;

    /// Backend-shaped submission body
    type Payload: Serialize;

    /// Short machine name (`property-sale`, `contract`, ...)
    const NAME: &'static str;

    /// Ordered step list driving the wizard
    fn steps() -> Vec<StepDefinition<Self>>;

    /// Apply one field update, rejecting values that are invalid on their own
    fn set_value(&mut self, field: Self::Field) -> Result<(), FieldError>;

    /// Whole-form schema check run at submit time
    fn validate(&self) -> Vec<FieldError>;

    /// Flatten the form into its payload, or report what is missing
    fn to_payload(&self) -> Result<Self::Payload, ValidationErrors>;

    /// Selected project, which gates structure loading
    fn project(&self) -> Option<&Project>;
}
