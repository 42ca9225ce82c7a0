//! Domain Layer - Core scouting logic
//!
//! Pure types and functions with no I/O. All external interactions happen
//! through the ports layer.
//!
//! - `listing`: Market listings and registry records
//! - `candidate_filter`: Price/volume/volatility admission thresholds
//! - `matcher`: Priority-ordered exact-name cross-referencing
//! - `analysis_fields`: Keyword extraction from free-form analysis text
//! - `report`: Candidate reports and run outcomes

pub mod listing;
pub mod candidate_filter;
pub mod matcher;
pub mod analysis_fields;
pub mod report;

pub use listing::{MarketListing, RegistryKind, RegistryRecord, UNKNOWN};
pub use candidate_filter::{CandidateFilter, FilterConfig, FilterConfigError, Rejection};
pub use matcher::{cross_reference, Registry, RegistryMatch};
pub use analysis_fields::{default_field_specs, AnalysisFields, ExtractedField, FieldExtractor, FieldSpec};
pub use report::{AbortReason, AnalysisReport, CandidateReport, RunOutcome};
