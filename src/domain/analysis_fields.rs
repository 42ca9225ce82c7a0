//! Analysis Field Extraction
//!
//! Best-effort extraction of labeled fields from free-form analysis text.
//! For every field the first line containing its keyword is taken verbatim;
//! fields without a matching line resolve to "Unknown". The field set is
//! plain data so new fields need no control-flow changes.

use serde::{Deserialize, Serialize};

use super::listing::UNKNOWN;

/// A labeled field and the keyword that selects its line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Display label
    pub label: String,
    /// Substring searched for in each line
    pub keyword: String,
    /// Compare ignoring case
    #[serde(default)]
    pub case_insensitive: bool,
}

impl FieldSpec {
    pub fn exact(label: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            keyword: keyword.into(),
            case_insensitive: false,
        }
    }

    pub fn any_case(label: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            keyword: keyword.into(),
            case_insensitive: true,
        }
    }

    fn matches(&self, line: &str) -> bool {
        if self.case_insensitive {
            line.to_lowercase().contains(&self.keyword.to_lowercase())
        } else {
            line.contains(&self.keyword)
        }
    }
}

/// Default research fields
pub fn default_field_specs() -> Vec<FieldSpec> {
    vec![
        FieldSpec::exact("Whitepaper", "Whitepaper"),
        FieldSpec::exact("Roadmap", "Roadmap"),
        FieldSpec::exact("Launchpad", "Launchpad"),
        FieldSpec::exact("ROI", "ROI"),
        FieldSpec::exact("Risk", "Risk"),
        FieldSpec::any_case("Exchanges", "exchange"),
        FieldSpec::any_case("Links", "link"),
        FieldSpec::any_case("Unlock schedule", "unlock"),
    ]
}

/// One extracted field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedField {
    pub label: String,
    pub value: String,
}

/// Extracted fields in field-set order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisFields {
    fields: Vec<ExtractedField>,
}

impl AnalysisFields {
    /// Value for a label, `None` if the label is not part of the field set
    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtractedField> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields that resolved to a real line
    pub fn known_count(&self) -> usize {
        self.fields.iter().filter(|f| f.value != UNKNOWN).count()
    }
}

/// Keyword-driven line extractor
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    specs: Vec<FieldSpec>,
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(default_field_specs())
    }
}

impl FieldExtractor {
    pub fn new(specs: Vec<FieldSpec>) -> Self {
        Self { specs }
    }

    pub fn specs(&self) -> &[FieldSpec] {
        &self.specs
    }

    pub fn extract(&self, text: &str) -> AnalysisFields {
        let fields = self
            .specs
            .iter()
            .map(|spec| ExtractedField {
                label: spec.label.clone(),
                value: text
                    .lines()
                    .find(|line| spec.matches(line))
                    .unwrap_or(UNKNOWN)
                    .to_string(),
            })
            .collect();

        AnalysisFields { fields }
    }

    /// Every field set to "Unknown"
    pub fn unknown(&self) -> AnalysisFields {
        let fields = self
            .specs
            .iter()
            .map(|spec| ExtractedField {
                label: spec.label.clone(),
                value: UNKNOWN.to_string(),
            })
            .collect();

        AnalysisFields { fields }
    }
}
