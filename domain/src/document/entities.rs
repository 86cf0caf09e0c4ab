//! Document entities and their status lifecycles
//!
//! Status changes happen on the backend. The client only reads them, so the
//! lifecycle here answers "what can still happen" for display purposes.

use crate::core::error::DomainError;
use crate::core::ids::{DocumentId, ProjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of tracked document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    OfferLetter,
    Contract,
    Lease,
    #[serde(other)]
    Other,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::OfferLetter => "offer_letter",
            DocumentKind::Contract => "contract",
            DocumentKind::Lease => "lease",
            DocumentKind::Other => "other",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "offer_letter" | "offer" => Ok(DocumentKind::OfferLetter),
            "contract" => Ok(DocumentKind::Contract),
            "lease" => Ok(DocumentKind::Lease),
            "other" => Ok(DocumentKind::Other),
            other => Err(DomainError::unknown("document kind", other)),
        }
    }
}

/// Status of a tracked document
///
/// Offer letters go `active → accepted | expired`; contracts go
/// `active → signed | expired`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Active,
    Accepted,
    Signed,
    Expired,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Active => "active",
            DocumentStatus::Accepted => "accepted",
            DocumentStatus::Signed => "signed",
            DocumentStatus::Expired => "expired",
        }
    }

    /// Whether no further status change is possible
    pub fn is_final(&self) -> bool {
        !matches!(self, DocumentStatus::Active)
    }

    /// Statuses a document of `kind` may move to from this one
    pub fn next_statuses(&self, kind: DocumentKind) -> &'static [DocumentStatus] {
        match (self, kind) {
            (DocumentStatus::Active, DocumentKind::OfferLetter) => {
                &[DocumentStatus::Accepted, DocumentStatus::Expired]
            }
            (DocumentStatus::Active, DocumentKind::Contract | DocumentKind::Lease) => {
                &[DocumentStatus::Signed, DocumentStatus::Expired]
            }
            (DocumentStatus::Active, DocumentKind::Other) => &[DocumentStatus::Expired],
            _ => &[],
        }
    }

    /// Whether this status is meaningful for `kind`
    pub fn applies_to(&self, kind: DocumentKind) -> bool {
        match self {
            DocumentStatus::Active | DocumentStatus::Expired => true,
            DocumentStatus::Accepted => kind == DocumentKind::OfferLetter,
            DocumentStatus::Signed => matches!(kind, DocumentKind::Contract | DocumentKind::Lease),
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DocumentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(DocumentStatus::Active),
            "accepted" => Ok(DocumentStatus::Accepted),
            "signed" => Ok(DocumentStatus::Signed),
            "expired" => Ok(DocumentStatus::Expired),
            other => Err(DomainError::unknown("document status", other)),
        }
    }
}

/// A document tracked by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub kind: DocumentKind,
    pub title: String,
    pub status: DocumentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    pub created_at: DateTime<Utc>,
}

/// Query for listing documents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    pub kind: Option<DocumentKind>,
    pub status: Option<DocumentStatus>,
    pub project_id: Option<ProjectId>,
}

impl DocumentFilter {
    pub fn matches(&self, record: &DocumentRecord) -> bool {
        self.kind.is_none_or(|k| record.kind == k)
            && self.status.is_none_or(|s| record.status == s)
            && self.project_id.is_none_or(|p| record.project_id == Some(p))
    }

    /// Query-string pairs for the filter's set fields
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(kind) = self.kind {
            pairs.push(("kind", kind.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.to_string()));
        }
        if let Some(project) = self.project_id {
            pairs.push(("project_id", project.to_string()));
        }
        pairs
    }
}
