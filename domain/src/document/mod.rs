//! Document records: offer letters, contracts, leases

pub mod entities;
