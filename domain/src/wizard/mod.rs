//! Generic multi-step wizard engine
//!
//! A wizard is a form type implementing [`form::WizardForm`] plus a
//! declarative list of [`engine::StepDefinition`]s. The engine owns the step
//! index, gates forward moves on the active step's completeness predicate and
//! only produces a payload from the final step.

pub mod engine;
pub mod form;
pub mod memo;
pub mod selection;
pub mod sequencer;
