//! Projects and their structure (blocks → floors → units, or houses)

pub mod availability;
pub mod entities;
pub mod views;
