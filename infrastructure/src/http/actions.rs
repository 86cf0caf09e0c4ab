//! reqwest adapter for the [`PropertyActions`] port.
//!
//! Each action is a `POST {base_url}/{actionName}` with a JSON body; the
//! response is unwrapped by [`decode`](super::envelope::decode).

use super::envelope::{Decoded, decode};
use async_trait::async_trait;
use estatedesk_application::{ActionError, PropertyActions, SubmissionReceipt};
use estatedesk_domain::{
    Agent, Buyer, ContractPayload, DocumentFilter, DocumentId, DocumentRecord, OfferLetterPayload,
    Owner, PaymentPlanTemplate, Project, ProjectId, ProjectStructure, PropertySalePayload,
    TenantAssignmentPayload,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::time::Duration;
use tracing::debug;

/// HTTP client for the backend's action functions
pub struct HttpPropertyActions {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPropertyActions {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ActionError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("estatedesk/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ActionError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn endpoint(&self, action: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), action)
    }

    async fn call<B, T>(&self, action: &str, body: &B) -> Result<Decoded<T>, ActionError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(action);
        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(transport_error)?;
        debug!("{} answered HTTP {} ({} bytes)", action, status, text.len());
        decode(status, &text)
    }

    /// Call an action whose `data` is required
    async fn fetch<B, T>(&self, action: &str, body: &B) -> Result<T, ActionError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.call(action, body)
            .await?
            .data
            .ok_or_else(|| ActionError::Decode(format!("{} returned no data", action)))
    }

    /// Call a listing action; missing `data` means an empty list
    async fn list<B, T>(&self, action: &str, body: &B) -> Result<Vec<T>, ActionError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        Ok(self.call(action, body).await?.data.unwrap_or_default())
    }

    async fn mutate<B>(&self, action: &str, body: &B) -> Result<SubmissionReceipt, ActionError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let decoded: Decoded<Value> = self.call(action, body).await?;
        Ok(receipt_from(decoded))
    }
}

fn transport_error(error: reqwest::Error) -> ActionError {
    if error.is_timeout() {
        ActionError::Timeout
    } else {
        ActionError::Transport(error.to_string())
    }
}

/// Pull the created record's id out of `data`, if the backend sent one
fn receipt_from(decoded: Decoded<Value>) -> SubmissionReceipt {
    let id = decoded.data.as_ref().and_then(|data| match data {
        Value::Number(n) => n.as_u64(),
        Value::Object(map) => map.get("id").and_then(Value::as_u64),
        _ => None,
    });
    SubmissionReceipt::new(id, decoded.message)
}

fn filter_body(filter: &DocumentFilter) -> Value {
    let map: Map<String, Value> = filter
        .query_pairs()
        .into_iter()
        .map(|(key, value)| (key.to_string(), Value::String(value)))
        .collect();
    Value::Object(map)
}

#[async_trait]
impl PropertyActions for HttpPropertyActions {
    async fn search_projects(&self, query: &str) -> Result<Vec<Project>, ActionError> {
        self.list("searchProjects", &json!({ "query": query })).await
    }

    async fn search_owners(&self, query: &str) -> Result<Vec<Owner>, ActionError> {
        self.list("searchOwners", &json!({ "query": query })).await
    }

    async fn search_agents(&self, query: &str) -> Result<Vec<Agent>, ActionError> {
        self.list("searchAgents", &json!({ "query": query })).await
    }

    async fn search_buyers(&self, query: &str) -> Result<Vec<Buyer>, ActionError> {
        self.list("searchBuyers", &json!({ "query": query })).await
    }

    async fn get_project_structure(
        &self,
        project_id: ProjectId,
    ) -> Result<ProjectStructure, ActionError> {
        let mut structure: ProjectStructure = self
            .fetch("getProjectStructure", &json!({ "project_id": project_id }))
            .await?;
        structure.project_id = project_id;
        Ok(structure)
    }

    async fn fetch_payment_plan_templates(&self) -> Result<Vec<PaymentPlanTemplate>, ActionError> {
        self.list("fetchPaymentPlanTemplates", &json!({})).await
    }

    async fn create_property_sale(
        &self,
        payload: &PropertySalePayload,
    ) -> Result<SubmissionReceipt, ActionError> {
        self.mutate("createPropertySale", payload).await
    }

    async fn create_contract(
        &self,
        payload: &ContractPayload,
    ) -> Result<SubmissionReceipt, ActionError> {
        self.mutate("createContract", payload).await
    }

    async fn create_offer_letter(
        &self,
        payload: &OfferLetterPayload,
    ) -> Result<SubmissionReceipt, ActionError> {
        self.mutate("createOfferLetter", payload).await
    }

    async fn create_tenant_assignment(
        &self,
        payload: &TenantAssignmentPayload,
    ) -> Result<SubmissionReceipt, ActionError> {
        self.mutate("createTenantAssignment", payload).await
    }

    async fn fetch_documents(
        &self,
        filter: &DocumentFilter,
    ) -> Result<Vec<DocumentRecord>, ActionError> {
        self.list("fetchDocuments", &filter_body(filter)).await
    }

    async fn delete_document(&self, id: DocumentId) -> Result<SubmissionReceipt, ActionError> {
        self.mutate("deleteDocument", &json!({ "id": id })).await
    }
}
