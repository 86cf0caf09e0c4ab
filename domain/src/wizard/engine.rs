//! Wizard engine: a form plus a declarative step list

use super::form::{FieldError, ValidationErrors, WizardForm};
use super::sequencer::StepSequencer;
use crate::core::error::DomainError;
use thiserror::Error;

/// Errors raised by wizard navigation and submission
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("Step {step} ({title}) is incomplete: {errors}")]
    StepIncomplete {
        step: usize,
        title: &'static str,
        errors: ValidationErrors,
    },

    #[error("Already at the last step")]
    AtLastStep,

    #[error("Submit is only available at step {total} (currently at step {current})")]
    NotAtFinalStep { current: usize, total: usize },

    #[error("Step {0} does not exist")]
    InvalidStep(usize),

    #[error("Form is invalid: {0}")]
    Invalid(ValidationErrors),
}

/// One step of a wizard: an id, a title and its completeness predicate
pub struct StepDefinition<F> {
    pub id: &'static str,
    pub title: &'static str,
    pub validate: fn(&F) -> Vec<FieldError>,
}

impl<F> StepDefinition<F> {
    pub fn new(id: &'static str, title: &'static str, validate: fn(&F) -> Vec<FieldError>) -> Self {
        Self {
            id,
            title,
            validate,
        }
    }

    /// Step with no required fields (review, confirmation)
    pub fn open(id: &'static str, title: &'static str) -> Self {
        Self::new(id, title, no_requirements::<F>)
    }

    pub fn issues(&self, form: &F) -> Vec<FieldError> {
        (self.validate)(form)
    }

    pub fn is_complete(&self, form: &F) -> bool {
        self.issues(form).is_empty()
    }
}

fn no_requirements<F>(_: &F) -> Vec<FieldError> {
    Vec::new()
}

impl<F> Clone for StepDefinition<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for StepDefinition<F> {}

impl<F> std::fmt::Debug for StepDefinition<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepDefinition")
            .field("id", &self.id)
            .field("title", &self.title)
            .finish()
    }
}

/// Per-step status, for progress displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepStatus {
    pub number: usize,
    pub id: &'static str,
    pub title: &'static str,
    pub complete: bool,
    pub current: bool,
}

/// A running wizard instance.
///
/// Created when the wizard opens, dropped on close or after a successful
/// submit. Nothing is persisted between instances.
#[derive(Debug)]
pub struct Wizard<F: WizardForm> {
    steps: Vec<StepDefinition<F>>,
    sequencer: StepSequencer,
    form: F,
}

impl<F: WizardForm> Wizard<F> {
    /// Open a wizard with the form's own step list
    pub fn new() -> Result<Self, DomainError> {
        Self::with_steps(F::steps())
    }

    pub fn with_steps(steps: Vec<StepDefinition<F>>) -> Result<Self, DomainError> {
        let sequencer = StepSequencer::new(steps.len())?;
        Ok(Self {
            steps,
            sequencer,
            form: F::default(),
        })
    }

    pub fn name(&self) -> &'static str {
        F::NAME
    }

    pub fn current_step(&self) -> usize {
        self.sequencer.current()
    }

    pub fn total_steps(&self) -> usize {
        self.sequencer.total()
    }

    pub fn current_definition(&self) -> &StepDefinition<F> {
        &self.steps[self.sequencer.current() - 1]
    }

    pub fn steps(&self) -> &[StepDefinition<F>] {
        &self.steps
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn into_form(self) -> F {
        self.form
    }

    /// Whether the submit action is reachable
    pub fn is_terminal(&self) -> bool {
        self.sequencer.is_last()
    }

    /// Field errors blocking the active step
    pub fn step_issues(&self) -> Vec<FieldError> {
        self.current_definition().issues(&self.form)
    }

    pub fn can_advance(&self) -> bool {
        !self.sequencer.is_last() && self.step_issues().is_empty()
    }

    /// Apply one field update from the active step
    pub fn set_value(&mut self, field: F::Field) -> Result<(), FieldError> {
        self.form.set_value(field)
    }

    /// Advance one step if the active step is complete
    pub fn next(&mut self) -> Result<usize, WizardError> {
        if self.sequencer.is_last() {
            return Err(WizardError::AtLastStep);
        }
        let definition = self.current_definition();
        let issues = definition.issues(&self.form);
        if !issues.is_empty() {
            return Err(WizardError::StepIncomplete {
                step: self.sequencer.current(),
                title: definition.title,
                errors: ValidationErrors(issues),
            });
        }
        self.sequencer.handle_next();
        Ok(self.sequencer.current())
    }

    /// Go back one step. Never validated.
    pub fn previous(&mut self) -> bool {
        self.sequencer.handle_previous()
    }

    /// Jump to `step`: backward freely, forward through each step's gate
    pub fn go_to(&mut self, step: usize) -> Result<usize, WizardError> {
        if step == 0 || step > self.total_steps() {
            return Err(WizardError::InvalidStep(step));
        }
        if step <= self.current_step() {
            self.sequencer.jump_back(step);
            return Ok(step);
        }
        while self.current_step() < step {
            self.next()?;
        }
        Ok(self.current_step())
    }

    /// Produce the payload. Only available at the final step, after a full
    /// schema check.
    pub fn submit(&self) -> Result<F::Payload, WizardError> {
        if !self.is_terminal() {
            return Err(WizardError::NotAtFinalStep {
                current: self.current_step(),
                total: self.total_steps(),
            });
        }
        self.form.to_payload().map_err(WizardError::Invalid)
    }

    pub fn progress(&self) -> Vec<StepStatus> {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| StepStatus {
                number: i + 1,
                id: step.id,
                title: step.title,
                complete: step.is_complete(&self.form),
                current: i + 1 == self.current_step(),
            })
            .collect()
    }

    /// Discard all entered data and return to step 1
    pub fn reset(&mut self) {
        self.form = F::default();
        self.sequencer.reset();
    }
}
