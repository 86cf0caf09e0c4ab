//! In-memory [`PropertyActions`] used by the use case tests.

use crate::ports::notifier::Notifier;
use crate::ports::property_actions::{ActionError, PropertyActions, SubmissionReceipt};
use async_trait::async_trait;
use estatedesk_domain::{
    Agent, Buyer, ContractPayload, DocumentFilter, DocumentId, DocumentRecord, OfferLetterPayload,
    Owner, PaymentPlanTemplate, Project, ProjectId, ProjectStructure, PropertySalePayload,
    TenantAssignmentPayload,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub(crate) struct MockActions {
    pub projects: Vec<Project>,
    pub owners: Vec<Owner>,
    pub agents: Vec<Agent>,
    pub buyers: Vec<Buyer>,
    pub templates: Vec<PaymentPlanTemplate>,
    pub structures: HashMap<ProjectId, ProjectStructure>,
    pub documents: Mutex<Vec<DocumentRecord>>,
    /// Scripted results for mutations; an empty queue means success
    pub mutation_results: Mutex<VecDeque<Result<SubmissionReceipt, ActionError>>>,
    /// Simulated network latency for searches
    pub search_latency: Duration,
    /// Project search returns every project regardless of the query
    pub ignore_query: bool,
    pub calls: Mutex<Vec<String>>,
}

impl MockActions {
    pub fn with_mutation_result(self, result: Result<SubmissionReceipt, ActionError>) -> Self {
        self.mutation_results.lock().unwrap().push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn mutation(&self, call: String) -> Result<SubmissionReceipt, ActionError> {
        self.record(call);
        self.mutation_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(SubmissionReceipt::new(Some(1), None)))
    }

    async fn latency(&self) {
        if !self.search_latency.is_zero() {
            tokio::time::sleep(self.search_latency).await;
        }
    }
}

#[async_trait]
impl PropertyActions for MockActions {
    async fn search_projects(&self, query: &str) -> Result<Vec<Project>, ActionError> {
        self.record(format!("search_projects:{}", query));
        self.latency().await;
        let needle = query.to_lowercase();
        Ok(self
            .projects
            .iter()
            .filter(|p| self.ignore_query || p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn search_owners(&self, query: &str) -> Result<Vec<Owner>, ActionError> {
        self.record(format!("search_owners:{}", query));
        let needle = query.to_lowercase();
        Ok(self
            .owners
            .iter()
            .filter(|o| o.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn search_agents(&self, query: &str) -> Result<Vec<Agent>, ActionError> {
        self.record(format!("search_agents:{}", query));
        let needle = query.to_lowercase();
        Ok(self
            .agents
            .iter()
            .filter(|a| a.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn search_buyers(&self, query: &str) -> Result<Vec<Buyer>, ActionError> {
        self.record(format!("search_buyers:{}", query));
        self.latency().await;
        let needle = query.to_lowercase();
        Ok(self
            .buyers
            .iter()
            .filter(|b| {
                b.name.to_lowercase().contains(&needle) || b.email.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn get_project_structure(
        &self,
        project_id: ProjectId,
    ) -> Result<ProjectStructure, ActionError> {
        self.record(format!("get_project_structure:{}", project_id));
        self.structures
            .get(&project_id)
            .cloned()
            .ok_or_else(|| ActionError::NotFound(format!("project {}", project_id)))
    }

    async fn fetch_payment_plan_templates(&self) -> Result<Vec<PaymentPlanTemplate>, ActionError> {
        self.record("fetch_payment_plan_templates".to_string());
        Ok(self.templates.clone())
    }

    async fn create_property_sale(
        &self,
        payload: &PropertySalePayload,
    ) -> Result<SubmissionReceipt, ActionError> {
        self.mutation(format!("create_property_sale:{}", payload.project_id))
    }

    async fn create_contract(
        &self,
        payload: &ContractPayload,
    ) -> Result<SubmissionReceipt, ActionError> {
        self.mutation(format!("create_contract:{}", payload.project_id))
    }

    async fn create_offer_letter(
        &self,
        payload: &OfferLetterPayload,
    ) -> Result<SubmissionReceipt, ActionError> {
        self.mutation(format!("create_offer_letter:{}", payload.project_id))
    }

    async fn create_tenant_assignment(
        &self,
        payload: &TenantAssignmentPayload,
    ) -> Result<SubmissionReceipt, ActionError> {
        self.mutation(format!("create_tenant_assignment:{}", payload.project_id))
    }

    async fn fetch_documents(
        &self,
        filter: &DocumentFilter,
    ) -> Result<Vec<DocumentRecord>, ActionError> {
        self.record("fetch_documents".to_string());
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect())
    }

    async fn delete_document(&self, id: DocumentId) -> Result<SubmissionReceipt, ActionError> {
        let result = self.mutation(format!("delete_document:{}", id));
        if result.is_ok() {
            self.documents.lock().unwrap().retain(|d| d.id != id);
        }
        result
    }
}

/// Notifier that remembers every toast
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    pub events: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn on_success(&self, message: &str) {
        self.events.lock().unwrap().push(format!("success:{}", message));
    }

    fn on_error(&self, message: &str) {
        self.events.lock().unwrap().push(format!("error:{}", message));
    }

    fn on_empty(&self, what: &str) {
        self.events.lock().unwrap().push(format!("empty:{}", what));
    }
}
