//! Enrichment Step
//!
//! Requests a research summary for a project and extracts labeled fields
//! from it. A failed analysis call never propagates: the candidate gets the
//! fallback text, every field set to "Unknown", and is flagged degraded.

use std::sync::Arc;

use crate::domain::{AnalysisFields, AnalysisReport, FieldExtractor};
use crate::ports::AnalysisService;

pub const DEFAULT_FALLBACK_TEXT: &str = "No information available.";

/// Enrichment settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentConfig {
    /// Text used in place of a failed analysis
    pub fallback_text: String,
    /// Truncate raw analysis text to this many characters
    pub max_chars: Option<usize>,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            fallback_text: DEFAULT_FALLBACK_TEXT.to_string(),
            max_chars: None,
        }
    }
}

/// Analysis text plus extracted fields for one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    pub analysis_text: String,
    pub fields: AnalysisFields,
    pub degraded: bool,
}

/// Wraps an analysis service with fallback and field extraction
#[derive(Clone)]
pub struct Enricher {
    service: Arc<dyn AnalysisService>,
    extractor: FieldExtractor,
    config: EnrichmentConfig,
}

impl Enricher {
    pub fn new(service: Arc<dyn AnalysisService>, config: EnrichmentConfig) -> Self {
        Self {
            service,
            extractor: FieldExtractor::default(),
            config,
        }
    }

    /// Replace the default field set
    pub fn with_extractor(mut self, extractor: FieldExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }

    pub async fn enrich(&self, project_name: &str) -> Enrichment {
        match self.service.analyze(project_name).await {
            Ok(text) => {
                let analysis_text = match self.config.max_chars {
                    Some(limit) => text.chars().take(limit).collect(),
                    None => text,
                };
                let fields = self.extractor.extract(&analysis_text);
                tracing::debug!(
                    "Analysis for {}: {}/{} fields recognised",
                    project_name,
                    fields.known_count(),
                    fields.len()
                );
                Enrichment {
                    analysis_text,
                    fields,
                    degraded: false,
                }
            }
            Err(e) => {
                tracing::warn!("Analysis for {} failed, using fallback: {}", project_name, e);
                Enrichment {
                    analysis_text: self.config.fallback_text.clone(),
                    fields: self.extractor.unknown(),
                    degraded: true,
                }
            }
        }
    }

    /// Single-project analysis outside of a run
    pub async fn check(&self, project_name: &str) -> AnalysisReport {
        let name = project_name.trim();
        let enrichment = self.enrich(name).await;
        AnalysisReport {
            name: name.to_string(),
            analysis_text: enrichment.analysis_text,
            fields: enrichment.fields,
            degraded: enrichment.degraded,
        }
    }
}
