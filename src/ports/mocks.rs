//! In-memory port implementations for tests and offline runs
//!
//! Each double records its calls and replays a configured response.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{AnalysisService, FetchOutcome, ListingSource, RegistrySource, SourceError};
use crate::domain::{MarketListing, RegistryKind, RegistryRecord};

/// Listing source that replays a fixed outcome
#[derive(Debug, Clone)]
pub struct StaticListingSource {
    outcome: FetchOutcome<MarketListing>,
    calls: Arc<Mutex<usize>>,
}

impl StaticListingSource {
    pub fn new(listings: Vec<MarketListing>) -> Self {
        Self::with_outcome(FetchOutcome::from_result(Ok(listings)))
    }

    /// Source that always fails with the given error
    pub fn unavailable(err: SourceError) -> Self {
        Self::with_outcome(FetchOutcome::Unavailable(err))
    }

    pub fn with_outcome(outcome: FetchOutcome<MarketListing>) -> Self {
        Self {
            outcome,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl ListingSource for StaticListingSource {
    fn source_name(&self) -> &'static str {
        "static-listings"
    }

    async fn fetch_listings(&self) -> FetchOutcome<MarketListing> {
        *self.calls.lock().unwrap() += 1;
        self.outcome.clone()
    }
}

/// Registry source that replays a fixed outcome
#[derive(Debug, Clone)]
pub struct StaticRegistrySource {
    kind: RegistryKind,
    outcome: FetchOutcome<RegistryRecord>,
}

impl StaticRegistrySource {
    pub fn new(kind: RegistryKind, records: Vec<RegistryRecord>) -> Self {
        Self {
            kind,
            outcome: FetchOutcome::from_result(Ok(records)),
        }
    }

    pub fn unavailable(kind: RegistryKind, err: SourceError) -> Self {
        Self {
            kind,
            outcome: FetchOutcome::Unavailable(err),
        }
    }
}

#[async_trait]
impl RegistrySource for StaticRegistrySource {
    fn kind(&self) -> RegistryKind {
        self.kind
    }

    async fn fetch_records(&self) -> FetchOutcome<RegistryRecord> {
        self.outcome.clone()
    }
}

/// Analysis service with per-project scripted responses
#[derive(Debug, Clone)]
pub struct ScriptedAnalysis {
    responses: Arc<Mutex<HashMap<String, Result<String, SourceError>>>>,
    default_response: Result<String, SourceError>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for ScriptedAnalysis {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedAnalysis {
    /// Unscripted projects get an empty-but-successful analysis
    pub fn new() -> Self {
        Self::answering(String::new())
    }

    /// Answer every unscripted project with `text`
    pub fn answering(text: impl Into<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Ok(text.into()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fail every unscripted project with `err`
    pub fn failing(err: SourceError) -> Self {
        Self {
            default_response: Err(err),
            ..Self::new()
        }
    }

    /// Builder method to script the response for a project
    pub fn with_response(self, project: &str, text: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(project.to_string(), Ok(text.to_string()));
        self
    }

    /// Builder method to script a failure for a project
    pub fn with_failure(self, project: &str, err: SourceError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(project.to_string(), Err(err));
        self
    }

    /// Get all recorded project names, in call order
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisService for ScriptedAnalysis {
    async fn analyze(&self, project_name: &str) -> Result<String, SourceError> {
        self.calls.lock().unwrap().push(project_name.to_string());
        self.responses
            .lock()
            .unwrap()
            .get(project_name)
            .cloned()
            .unwrap_or_else(|| self.default_response.clone())
    }
}
