//! Documents use case.
//!
//! Lists offer letters, contracts and leases tracked by the backend, and
//! deletes them. Empty listings are reported as a placeholder rather than
//! an error.

use crate::ports::notifier::Notifier;
use crate::ports::property_actions::{ActionError, PropertyActions, SubmissionReceipt};
use estatedesk_domain::{DocumentFilter, DocumentId, DocumentRecord};
use std::sync::Arc;
use tracing::{info, warn};

pub struct DocumentsUseCase {
    actions: Arc<dyn PropertyActions>,
}

impl DocumentsUseCase {
    pub fn new(actions: Arc<dyn PropertyActions>) -> Self {
        Self { actions }
    }

    /// Documents matching `filter`, newest first
    pub async fn list(
        &self,
        filter: &DocumentFilter,
        notifier: &dyn Notifier,
    ) -> Result<Vec<DocumentRecord>, ActionError> {
        notifier.on_request_start("fetchDocuments");
        let result = self.actions.fetch_documents(filter).await;
        notifier.on_request_end();

        let mut documents = match result {
            Ok(documents) => documents,
            Err(e) => {
                warn!("Failed to fetch documents: {}", e);
                notifier.on_error(e.server_message().unwrap_or("Failed to load documents"));
                return Err(e);
            }
        };
        // the backend may ignore unknown filters
        documents.retain(|d| filter.matches(d));
        documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        if documents.is_empty() {
            notifier.on_empty("documents");
        }
        Ok(documents)
    }

    pub async fn delete(
        &self,
        id: DocumentId,
        notifier: &dyn Notifier,
    ) -> Result<SubmissionReceipt, ActionError> {
        info!("Deleting document {}", id);
        notifier.on_request_start("deleteDocument");
        let result = self.actions.delete_document(id).await;
        notifier.on_request_end();

        match result {
            Ok(receipt) => {
                let message = receipt
                    .message
                    .as_deref()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or("Document deleted");
                notifier.on_success(message);
                Ok(receipt)
            }
            Err(e) => {
                warn!("Failed to delete document {}: {}", id, e);
                notifier.on_error(e.server_message().unwrap_or("Failed to delete document"));
                Err(e)
            }
        }
    }
}
