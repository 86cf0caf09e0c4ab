//! Port definitions (interfaces for external dependencies)
//!
//! Ports define the boundaries between the application layer and
//! infrastructure. Adapters in the infrastructure and presentation layers
//! implement these traits.

pub mod notifier;
pub mod property_actions;
pub mod submission_log;
