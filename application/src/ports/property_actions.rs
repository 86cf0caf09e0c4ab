//! Property actions port
//!
//! Defines the interface for the external backend. Every operation is a
//! remote "action" returning a `{ success | error, data, message }` envelope;
//! adapters unwrap the envelope and map failures onto [`ActionError`].

use async_trait::async_trait;
use estatedesk_domain::{
    Agent, Buyer, ContractPayload, DocumentFilter, DocumentId, DocumentRecord, OfferLetterPayload,
    Owner, PaymentPlanTemplate, Project, ProjectId, ProjectStructure, PropertySalePayload,
    TenantAssignmentPayload,
};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while calling a backend action
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    /// The backend answered with `success: false` or `error: true`
    #[error("{}", .0.as_deref().unwrap_or("Request rejected"))]
    Rejected(Option<String>),

    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Http { status: u16, message: Option<String> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Connection error: {0}")]
    Transport(String),

    #[error("Timeout")]
    Timeout,

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ActionError {
    /// Message supplied by the backend, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ActionError::Rejected(message) | ActionError::Http { message, .. } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            _ => None,
        }
    }
}

/// Result of a successful mutation
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubmissionReceipt {
    /// Id of the record the backend created, when it reports one
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

impl SubmissionReceipt {
    pub fn new(id: Option<u64>, message: Option<String>) -> Self {
        Self { id, message }
    }
}

/// Gateway to the backend's action functions
///
/// This port defines how the application layer reads and mutates portfolio
/// data. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait PropertyActions: Send + Sync {
    /// Projects whose name or location matches `query`
    async fn search_projects(&self, query: &str) -> Result<Vec<Project>, ActionError>;

    async fn search_owners(&self, query: &str) -> Result<Vec<Owner>, ActionError>;

    async fn search_agents(&self, query: &str) -> Result<Vec<Agent>, ActionError>;

    /// Buyers and tenant users matching a name or email
    async fn search_buyers(&self, query: &str) -> Result<Vec<Buyer>, ActionError>;

    /// Blocks, floors, units and houses of one project
    async fn get_project_structure(
        &self,
        project_id: ProjectId,
    ) -> Result<ProjectStructure, ActionError>;

    async fn fetch_payment_plan_templates(&self) -> Result<Vec<PaymentPlanTemplate>, ActionError>;

    async fn create_property_sale(
        &self,
        payload: &PropertySalePayload,
    ) -> Result<SubmissionReceipt, ActionError>;

    async fn create_contract(
        &self,
        payload: &ContractPayload,
    ) -> Result<SubmissionReceipt, ActionError>;

    async fn create_offer_letter(
        &self,
        payload: &OfferLetterPayload,
    ) -> Result<SubmissionReceipt, ActionError>;

    async fn create_tenant_assignment(
        &self,
        payload: &TenantAssignmentPayload,
    ) -> Result<SubmissionReceipt, ActionError>;

    async fn fetch_documents(
        &self,
        filter: &DocumentFilter,
    ) -> Result<Vec<DocumentRecord>, ActionError>;

    async fn delete_document(&self, id: DocumentId) -> Result<SubmissionReceipt, ActionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_only_for_backend_failures() {
        let rejected = ActionError::Rejected(Some("Unit already sold".to_string()));
        assert_eq!(rejected.server_message(), Some("Unit already sold"));
        assert_eq!(rejected.to_string(), "Unit already sold");

        let blank = ActionError::Http {
            status: 500,
            message: Some("  ".to_string()),
        };
        assert_eq!(blank.server_message(), None);
        assert_eq!(ActionError::Timeout.server_message(), None);
        assert_eq!(ActionError::Rejected(None).to_string(), "Request rejected");
    }
}
