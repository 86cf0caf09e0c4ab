//! HTTP adapter for the backend's action API.
//!
//! - [`HttpPropertyActions`]: reqwest implementation of the
//!   [`PropertyActions`](estatedesk_application::PropertyActions) port
//! - [`envelope`]: `{ success | error, data, message }` decoding

mod actions;
pub mod envelope;

pub use actions::HttpPropertyActions;
