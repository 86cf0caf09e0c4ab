//! Debounced search use case.
//!
//! Backs one search box (projects, owners, agents or buyers). Each keystroke
//! calls [`DebouncedSearch::search`]; the call waits out the debounce window
//! and only the latest query is sent. Every query takes a new generation
//! number: a query that is no longer the latest when its window closes is
//! dropped without a request, and a response that lands after a newer query
//! was typed is discarded.

use crate::config::BehaviorConfig;
use crate::ports::property_actions::{ActionError, PropertyActions};
use estatedesk_domain::{Agent, Buyer, Owner, Project, filter_projects};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

/// Which backend search a box is wired to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTarget {
    Projects,
    Owners,
    Agents,
    Buyers,
}

impl SearchTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchTarget::Projects => "projects",
            SearchTarget::Owners => "owners",
            SearchTarget::Agents => "agents",
            SearchTarget::Buyers => "buyers",
        }
    }
}

impl fmt::Display for SearchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SearchTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "projects" | "project" => Ok(SearchTarget::Projects),
            "owners" | "owner" => Ok(SearchTarget::Owners),
            "agents" | "agent" => Ok(SearchTarget::Agents),
            "buyers" | "buyer" | "tenants" | "tenant" => Ok(SearchTarget::Buyers),
            other => Err(format!("unknown search target: {}", other)),
        }
    }
}

/// Records returned by a search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchHits {
    Projects(Vec<Project>),
    Owners(Vec<Owner>),
    Agents(Vec<Agent>),
    Buyers(Vec<Buyer>),
}

impl SearchHits {
    pub fn len(&self) -> usize {
        match self {
            SearchHits::Projects(v) => v.len(),
            SearchHits::Owners(v) => v.len(),
            SearchHits::Agents(v) => v.len(),
            SearchHits::Buyers(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What became of one query
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The query was the latest and the backend answered
    Hits(SearchHits),
    /// A newer query replaced this one
    Superseded,
    /// Too short to send
    Skipped,
}

/// One search box with latest-wins debouncing
pub struct DebouncedSearch {
    actions: Arc<dyn PropertyActions>,
    target: SearchTarget,
    debounce: Duration,
    min_query_chars: usize,
    generation: AtomicU64,
}

impl DebouncedSearch {
    pub fn new(actions: Arc<dyn PropertyActions>, target: SearchTarget) -> Self {
        Self::with_config(actions, target, &BehaviorConfig::default())
    }

    pub fn with_config(
        actions: Arc<dyn PropertyActions>,
        target: SearchTarget,
        config: &BehaviorConfig,
    ) -> Self {
        Self {
            actions,
            target,
            debounce: config.search_debounce,
            min_query_chars: config.min_query_chars.max(1),
            generation: AtomicU64::new(0),
        }
    }

    pub fn target(&self) -> SearchTarget {
        self.target
    }

    /// Generation of the most recent query
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation() == generation
    }

    /// Submit the current text of the search box.
    pub async fn search(&self, query: &str) -> Result<SearchOutcome, ActionError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let query = query.trim();
        if query.chars().count() < self.min_query_chars {
            return Ok(SearchOutcome::Skipped);
        }

        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
        }
        if !self.is_current(generation) {
            debug!("{} search '{}' superseded before sending", self.target, query);
            return Ok(SearchOutcome::Superseded);
        }

        let hits = self.fetch(query).await;
        if !self.is_current(generation) {
            debug!("{} search '{}' answered after a newer query", self.target, query);
            return Ok(SearchOutcome::Superseded);
        }
        let hits = hits?;
        debug!("{} search '{}' returned {} hits", self.target, query, hits.len());
        Ok(SearchOutcome::Hits(hits))
    }

    /// Search immediately, bypassing debounce and generations.
    pub async fn search_now(&self, query: &str) -> Result<SearchHits, ActionError> {
        self.fetch(query.trim()).await
    }

    async fn fetch(&self, query: &str) -> Result<SearchHits, ActionError> {
        Ok(match self.target {
            SearchTarget::Projects => {
                let projects = self.actions.search_projects(query).await?;
                SearchHits::Projects(
                    filter_projects(&projects, query)
                        .into_iter()
                        .cloned()
                        .collect(),
                )
            }
            SearchTarget::Owners => SearchHits::Owners(self.actions.search_owners(query).await?),
            SearchTarget::Agents => SearchHits::Agents(self.actions.search_agents(query).await?),
            SearchTarget::Buyers => SearchHits::Buyers(self.actions.search_buyers(query).await?),
        })
    }
}
