//! Application Layer
//!
//! Use cases wiring the ports together: a full scouting run and a
//! single-project check.

pub mod enrichment;
pub mod pipeline;

pub use enrichment::{Enricher, Enrichment, EnrichmentConfig, DEFAULT_FALLBACK_TEXT};
pub use pipeline::{PipelineConfig, ScoutPipeline, Shortlisted, DEFAULT_MAX_REPORTS};
