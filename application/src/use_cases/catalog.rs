//! Catalog use case.
//!
//! Read-only lookups against the backend: exact record resolution for
//! scripted wizards, project structure, availability and payment plan
//! templates.

use crate::ports::property_actions::{ActionError, PropertyActions};
use estatedesk_domain::{
    Agent, AvailabilityMatrix, Buyer, Owner, PaymentPlanTemplate, Project, ProjectStructure,
    filter_projects,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors raised while resolving a named record
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("No {kind} matches '{query}'")]
    NotFound { kind: &'static str, query: String },

    #[error("'{query}' matches {count} {kind}s, be more specific")]
    Ambiguous {
        kind: &'static str,
        query: String,
        count: usize,
    },

    #[error(transparent)]
    Action(#[from] ActionError),
}

/// Pick the single record matching `query`.
///
/// An exact (case-insensitive) match wins over partial matches.
fn resolve<T: Clone>(
    kind: &'static str,
    query: &str,
    candidates: Vec<T>,
    key: impl Fn(&T) -> &str,
) -> Result<T, LookupError> {
    let wanted = query.trim().to_lowercase();
    let exact: Vec<&T> = candidates
        .iter()
        .filter(|c| key(c).to_lowercase() == wanted)
        .collect();
    match (exact.as_slice(), candidates.len()) {
        ([one], _) => Ok((*one).clone()),
        ([], 1) => Ok(candidates[0].clone()),
        ([], 0) => Err(LookupError::NotFound {
            kind,
            query: query.to_string(),
        }),
        (many, count) => Err(LookupError::Ambiguous {
            kind,
            query: query.to_string(),
            count: if many.is_empty() { count } else { many.len() },
        }),
    }
}

pub struct CatalogUseCase {
    actions: Arc<dyn PropertyActions>,
}

impl CatalogUseCase {
    pub fn new(actions: Arc<dyn PropertyActions>) -> Self {
        Self { actions }
    }

    pub async fn find_project(&self, name: &str) -> Result<Project, LookupError> {
        let found = self.actions.search_projects(name.trim()).await?;
        let hits: Vec<Project> = filter_projects(&found, name).into_iter().cloned().collect();
        debug!("'{}' matched {} projects", name, hits.len());
        resolve("project", name, hits, |p| p.name.as_str())
    }

    pub async fn find_buyer(&self, email: &str) -> Result<Buyer, LookupError> {
        let hits = self.actions.search_buyers(email.trim()).await?;
        resolve("buyer", email, hits, |b| b.email.as_str())
    }

    pub async fn find_owner(&self, name: &str) -> Result<Owner, LookupError> {
        let hits = self.actions.search_owners(name.trim()).await?;
        resolve("owner", name, hits, |o| o.name.as_str())
    }

    pub async fn find_agent(&self, name: &str) -> Result<Agent, LookupError> {
        let hits = self.actions.search_agents(name.trim()).await?;
        resolve("agent", name, hits, |a| a.name.as_str())
    }

    pub async fn structure(&self, project: &Project) -> Result<ProjectStructure, ActionError> {
        self.actions.get_project_structure(project.id).await
    }

    /// Per block/floor availability of one project
    pub async fn availability(&self, project: &Project) -> Result<AvailabilityMatrix, ActionError> {
        let structure = self.structure(project).await?;
        Ok(AvailabilityMatrix::from_structure(&structure))
    }

    pub async fn templates(&self) -> Result<Vec<PaymentPlanTemplate>, ActionError> {
        self.actions.fetch_payment_plan_templates().await
    }

    pub async fn find_template(&self, name: &str) -> Result<PaymentPlanTemplate, LookupError> {
        let templates = self.templates().await?;
        let wanted = name.trim().to_lowercase();
        let hits = templates
            .into_iter()
            .filter(|t| t.name.to_lowercase().contains(&wanted))
            .collect();
        resolve("payment plan template", name, hits, |t| t.name.as_str())
    }
}
