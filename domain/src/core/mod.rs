//! Core value objects shared across all subdomains.
//!
//! - [`money::Money`]: fixed-point currency amount
//! - [`percentage::Percentage`]: percentage with two decimals
//! - [`ids`]: typed identifiers for server-owned records
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod ids;
pub mod money;
pub mod percentage;
