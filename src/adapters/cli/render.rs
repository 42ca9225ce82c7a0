//! Report rendering
//!
//! Plain-text and JSON views of run outcomes and single-project checks.
//! An aborted run and a run without candidates render differently.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;

use crate::domain::{AnalysisFields, AnalysisReport, CandidateReport, RunOutcome, UNKNOWN};

pub const MARKET_UNAVAILABLE_MESSAGE: &str = "Market data source unavailable, no report generated.";
pub const NO_CANDIDATES_MESSAGE: &str = "No candidates found.";

/// JSON envelope for a run
#[derive(Debug, Serialize)]
struct DatedOutcome<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    outcome: &'a RunOutcome,
}

/// Render a run outcome as text
pub fn render_outcome(outcome: &RunOutcome, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Presale report ({})", generated_at.format("%Y-%m-%d"));
    let _ = writeln!(out);

    match outcome {
        RunOutcome::Aborted { reason } => {
            let _ = writeln!(out, "{}", MARKET_UNAVAILABLE_MESSAGE);
            let _ = writeln!(out, "  Reason: {}", reason);
        }
        RunOutcome::Completed { reports } if reports.is_empty() => {
            let _ = writeln!(out, "{}", NO_CANDIDATES_MESSAGE);
        }
        RunOutcome::Completed { reports } => {
            for (index, report) in reports.iter().enumerate() {
                render_candidate(&mut out, index + 1, report);
            }
        }
    }
    out
}

fn render_candidate(out: &mut String, position: usize, report: &CandidateReport) {
    let _ = writeln!(out, "{}. {} ({})", position, report.name, report.symbol);
    let _ = writeln!(out, "   Price: ${}", report.price);
    let _ = writeln!(out, "   Source: {} ({})", report.registry.label(), report.registry_status);
    let _ = writeln!(out, "   ICO: {} to {}", report.ico_start, report.ico_end);
    let _ = writeln!(out, "   Description: {}", report.description);
    render_fields(out, &report.fields);
    if report.analysis_degraded {
        let _ = writeln!(out, "   Analysis: {}", report.analysis_text);
    }
    let _ = writeln!(out);
}

fn render_fields(out: &mut String, fields: &AnalysisFields) {
    for field in fields.iter() {
        if field.value == UNKNOWN {
            let _ = writeln!(out, "   {}: {}", field.label, UNKNOWN);
        } else {
            let _ = writeln!(out, "   {}", field.value);
        }
    }
}

/// Render a run outcome as pretty JSON, stamped with the generation time
pub fn render_outcome_json(
    outcome: &RunOutcome,
    generated_at: DateTime<Utc>,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&DatedOutcome {
        generated_at,
        outcome,
    })
}

/// Render a single-project check as text
pub fn render_analysis(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Analysis: {}", report.name);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", report.analysis_text);
    let _ = writeln!(out);
    let _ = writeln!(out, "Extracted fields:");
    render_fields(&mut out, &report.fields);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AbortReason, FieldExtractor, RegistryKind};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn report() -> CandidateReport {
        let text = "Whitepaper: alpha.io/wp\nRisk: 2";
        CandidateReport {
            name: "AlphaCoin".to_string(),
            symbol: "ALP".to_string(),
            price: dec!(0.5),
            registry: RegistryKind::PresaleRegistry,
            registry_status: "Upcoming".to_string(),
            ico_start: "2024-01-01".to_string(),
            ico_end: "2024-02-01".to_string(),
            description: "test token".to_string(),
            analysis_text: text.to_string(),
            fields: FieldExtractor::default().extract(text),
            analysis_degraded: false,
        }
    }

    #[test]
    fn test_render_completed() {
        let text = render_outcome(&RunOutcome::completed(vec![report()]), date());

        assert!(text.starts_with("Presale report (2024-05-01)"));
        assert!(text.contains("1. AlphaCoin (ALP)"));
        assert!(text.contains("Price: $0.5"));
        assert!(text.contains("Source: presale registry (Upcoming)"));
        assert!(text.contains("ICO: 2024-01-01 to 2024-02-01"));
        assert!(text.contains("   Whitepaper: alpha.io/wp"));
        assert!(text.contains("   Roadmap: Unknown"));
        assert!(!text.contains("Analysis:"));
    }

    #[test]
    fn test_no_candidates_and_abort_are_distinct() {
        let empty = render_outcome(&RunOutcome::completed(vec![]), date());
        let aborted = render_outcome(
            &RunOutcome::aborted(AbortReason::SourceUnavailable {
                source_name: "coinmarketcap".to_string(),
                reason: "request timed out".to_string(),
            }),
            date(),
        );

        assert!(empty.contains(NO_CANDIDATES_MESSAGE));
        assert!(!empty.contains(MARKET_UNAVAILABLE_MESSAGE));
        assert!(aborted.contains(MARKET_UNAVAILABLE_MESSAGE));
        assert!(aborted.contains("coinmarketcap unavailable: request timed out"));
        assert!(!aborted.contains(NO_CANDIDATES_MESSAGE));
    }

    #[test]
    fn test_render_json() {
        let json = render_outcome_json(&RunOutcome::completed(vec![report()]), date()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["outcome"], "completed");
        assert_eq!(value["generated_at"], "2024-05-01T12:00:00Z");
        assert_eq!(value["reports"][0]["name"], "AlphaCoin");
        assert_eq!(value["reports"][0]["registry"], "presale_registry");
    }

    #[test]
    fn test_render_analysis_keeps_full_text() {
        let text = "Whitepaper: beta.io/wp\nTeam is doxxed.\nRisk: 3";
        let report = AnalysisReport {
            name: "BetaCoin".to_string(),
            analysis_text: text.to_string(),
            fields: FieldExtractor::default().extract(text),
            degraded: false,
        };
        let rendered = render_analysis(&report);

        assert!(rendered.contains("Team is doxxed."));
        assert!(rendered.contains(text));
        assert!(rendered.contains("   Risk: 3"));
        assert!(rendered.contains("   Roadmap: Unknown"));
    }

    #[test]
    fn test_render_degraded_analysis() {
        let report = AnalysisReport {
            name: "BetaCoin".to_string(),
            analysis_text: "No information available.".to_string(),
            fields: FieldExtractor::default().unknown(),
            degraded: true,
        };
        let text = render_analysis(&report);

        assert!(text.contains("Analysis: BetaCoin"));
        assert!(text.contains("No information available."));
        assert!(text.contains("Risk: Unknown"));
    }
}
