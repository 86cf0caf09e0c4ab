//! Party entities

use crate::core::ids::{AgentId, BuyerId, OwnerId};
use serde::{Deserialize, Serialize};

/// A buyer or tenant user.
///
/// The backend uses the same record for both roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buyer {
    pub id: BuyerId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl Buyer {
    pub fn new(id: u64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: BuyerId(id),
            name: name.into(),
            email: email.into(),
            phone: String::new(),
            photo: None,
        }
    }
}

/// Alias used by the tenant assignment flow
pub type TenantUser = Buyer;

/// A property owner (seller side of a contract)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: OwnerId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// A sales agent earning commission on a deal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agency: Option<String>,
}
