//! Candidate Reports and Run Outcomes

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::analysis_fields::AnalysisFields;
use super::listing::RegistryKind;

/// A filtered, corroborated and enriched listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateReport {
    pub name: String,
    pub symbol: String,
    pub price: Decimal,
    /// Registry that supplied the match
    pub registry: RegistryKind,
    pub registry_status: String,
    pub ico_start: String,
    pub ico_end: String,
    pub description: String,
    /// Raw analysis text, or the fallback text when enrichment failed
    pub analysis_text: String,
    pub fields: AnalysisFields,
    /// True when the analysis call failed and the fallback text was used
    pub analysis_degraded: bool,
}

/// Result of a single-project analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub name: String,
    pub analysis_text: String,
    pub fields: AnalysisFields,
    pub degraded: bool,
}

/// Why a run stopped without producing reports
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum AbortReason {
    #[error("{source_name} unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },
}

/// Terminal state of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Zero or more reports in market-listing order
    Completed { reports: Vec<CandidateReport> },
    /// The primary market listing could not be fetched
    Aborted { reason: AbortReason },
}

impl RunOutcome {
    pub fn completed(reports: Vec<CandidateReport>) -> Self {
        RunOutcome::Completed { reports }
    }

    pub fn aborted(reason: AbortReason) -> Self {
        RunOutcome::Aborted { reason }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, RunOutcome::Aborted { .. })
    }

    /// Completed with nothing to report
    pub fn is_no_candidates(&self) -> bool {
        matches!(self, RunOutcome::Completed { reports } if reports.is_empty())
    }

    /// Reports of a completed run; empty when aborted
    pub fn reports(&self) -> &[CandidateReport] {
        match self {
            RunOutcome::Completed { reports } => reports,
            RunOutcome::Aborted { .. } => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abort() -> AbortReason {
        AbortReason::SourceUnavailable {
            source_name: "coinmarketcap".to_string(),
            reason: "Request timed out".to_string(),
        }
    }

    #[test]
    fn test_aborted_is_distinct_from_no_candidates() {
        let aborted = RunOutcome::aborted(abort());
        let empty = RunOutcome::completed(Vec::new());

        assert!(aborted.is_aborted());
        assert!(!aborted.is_no_candidates());
        assert!(empty.is_no_candidates());
        assert!(!empty.is_aborted());
        assert!(aborted.reports().is_empty());
    }

    #[test]
    fn test_abort_reason_display() {
        let msg = abort().to_string();
        assert!(msg.contains("coinmarketcap"));
        assert!(msg.contains("timed out"));
    }

    #[test]
    fn test_outcome_serialization_tag() {
        let json = serde_json::to_string(&RunOutcome::aborted(abort())).unwrap();
        assert!(json.contains("\"outcome\":\"aborted\""));

        let json = serde_json::to_string(&RunOutcome::completed(Vec::new())).unwrap();
        assert!(json.contains("\"outcome\":\"completed\""));
    }
}
