//! Scouting Pipeline
//!
//! One run: fetch sources -> filter -> cross-reference -> bound -> enrich.
//!
//! The market listing, presale registry and scraper reads are independent
//! and issued concurrently; each outcome is handled on its own so a failing
//! registry can never block or fail the listing path. Only an unavailable
//! market listing aborts the run. Candidates are bounded to `max_reports`
//! before enrichment, so no analysis call is made for a listing that would
//! be truncated away.

use std::sync::Arc;

use futures::future::join_all;

use super::enrichment::{Enricher, EnrichmentConfig};
use crate::domain::{
    cross_reference, AbortReason, AnalysisReport, CandidateFilter, CandidateReport, FilterConfig,
    MarketListing, Registry, RegistryMatch, RunOutcome,
};
use crate::ports::{AnalysisService, FetchOutcome, ListingSource, RegistrySource};

pub const DEFAULT_MAX_REPORTS: usize = 3;

/// Immutable per-run settings
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub filter: FilterConfig,
    /// Upper bound on reports per run
    pub max_reports: usize,
    pub enrichment: EnrichmentConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            filter: FilterConfig::default(),
            max_reports: DEFAULT_MAX_REPORTS,
            enrichment: EnrichmentConfig::default(),
        }
    }
}

/// A listing that passed the filter and has registry corroboration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shortlisted<'a> {
    pub listing: &'a MarketListing,
    pub registry_match: RegistryMatch<'a>,
}

/// Pipeline orchestrator
pub struct ScoutPipeline {
    config: PipelineConfig,
    filter: CandidateFilter,
    listings: Arc<dyn ListingSource>,
    registries: Vec<Arc<dyn RegistrySource>>,
    enricher: Enricher,
}

impl ScoutPipeline {
    pub fn new(
        config: PipelineConfig,
        listings: Arc<dyn ListingSource>,
        analysis: Arc<dyn AnalysisService>,
    ) -> Self {
        let enricher = Enricher::new(analysis, config.enrichment.clone());
        Self {
            filter: CandidateFilter::new(config.filter),
            config,
            listings,
            registries: Vec::new(),
            enricher,
        }
    }

    /// Add an auxiliary registry; match priority comes from its kind
    pub fn with_registry(mut self, registry: Arc<dyn RegistrySource>) -> Self {
        self.registries.push(registry);
        self
    }

    /// Replace the default enricher (custom field set)
    pub fn with_enricher(mut self, enricher: Enricher) -> Self {
        self.enricher = enricher;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Execute one run
    pub async fn run(&self) -> RunOutcome {
        tracing::info!(
            "Starting scouting run ({} registries, max {} reports)",
            self.registries.len(),
            self.config.max_reports
        );

        // 1-2. Fetch all sources concurrently
        let (listing_outcome, registries) =
            tokio::join!(self.listings.fetch_listings(), self.fetch_registries());

        let listings = match listing_outcome {
            FetchOutcome::Unavailable(err) => {
                let source_name = self.listings.source_name();
                tracing::error!("Aborting run, {} unavailable: {}", source_name, err);
                return RunOutcome::aborted(AbortReason::SourceUnavailable {
                    source_name: source_name.to_string(),
                    reason: err.to_string(),
                });
            }
            outcome => outcome.into_records(),
        };

        // 3-4. Filter, match and bound before any enrichment call
        let shortlist = self.shortlist(&listings, &registries);
        tracing::info!(
            "{} of {} listings shortlisted",
            shortlist.len(),
            listings.len()
        );

        // 5. join_all keeps listing order
        let reports = join_all(shortlist.into_iter().map(|c| self.build_report(c))).await;

        if reports.is_empty() {
            tracing::info!("Run completed with no candidates");
        } else {
            tracing::info!("Run completed with {} candidates", reports.len());
        }
        RunOutcome::completed(reports)
    }

    /// Filter and cross-reference listings in source order, stopping at
    /// `max_reports` survivors
    pub fn shortlist<'a>(
        &self,
        listings: &'a [MarketListing],
        registries: &'a [Registry],
    ) -> Vec<Shortlisted<'a>> {
        listings
            .iter()
            .filter(|listing| match self.filter.check(listing) {
                Ok(()) => true,
                Err(rejection) => {
                    tracing::debug!("Skipping {}: {}", listing.name, rejection);
                    false
                }
            })
            .filter_map(|listing| match cross_reference(listing, registries) {
                Some(registry_match) => {
                    tracing::debug!("{} matched in {}", listing.name, registry_match.kind);
                    Some(Shortlisted {
                        listing,
                        registry_match,
                    })
                }
                None => {
                    tracing::debug!("Skipping {}: no registry match", listing.name);
                    None
                }
            })
            .take(self.config.max_reports)
            .collect()
    }

    /// Analyse a single project without running the pipeline
    pub async fn check(&self, project_name: &str) -> AnalysisReport {
        self.enricher.check(project_name).await
    }

    async fn fetch_registries(&self) -> Vec<Registry> {
        let outcomes = join_all(
            self.registries
                .iter()
                .map(|source| async move { (source.kind(), source.fetch_records().await) }),
        )
        .await;

        outcomes
            .into_iter()
            .map(|(kind, outcome)| {
                match &outcome {
                    FetchOutcome::Records(records) => {
                        tracing::info!("{}: {} records", kind, records.len())
                    }
                    FetchOutcome::Empty => tracing::info!("{} returned no records", kind),
                    FetchOutcome::Unavailable(err) => {
                        tracing::warn!("{} unavailable, continuing without it: {}", kind, err)
                    }
                }
                Registry::new(kind, outcome.into_records())
            })
            .collect()
    }

    async fn build_report(&self, candidate: Shortlisted<'_>) -> CandidateReport {
        let Shortlisted {
            listing,
            registry_match,
        } = candidate;
        let record = registry_match.record;
        let enrichment = self.enricher.enrich(&listing.name).await;

        CandidateReport {
            name: listing.name.clone(),
            symbol: listing.symbol.clone(),
            price: listing.price,
            registry: registry_match.kind,
            registry_status: record.status_or_unknown().to_string(),
            ico_start: record.start_date_or_unknown().to_string(),
            ico_end: record.end_date_or_unknown().to_string(),
            description: record.description_or_unknown().to_string(),
            analysis_text: enrichment.analysis_text,
            fields: enrichment.fields,
            analysis_degraded: enrichment.degraded,
        }
    }
}
