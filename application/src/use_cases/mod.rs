//! Use cases (application services)

pub mod catalog;
pub mod documents;
pub mod search;
pub mod submit;
pub mod wizard_session;

#[cfg(test)]
pub(crate) mod mock_actions;
