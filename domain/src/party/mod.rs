//! People involved in a deal: buyers/tenants, owners, agents

pub mod entities;
