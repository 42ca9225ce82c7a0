//! Registry wire types
//!
//! Both registries emit entries with the same camelCase shape.

use serde::Deserialize;

use crate::domain::listing::{non_blank, RegistryRecord};

/// One ICO/presale entry as sent by a registry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(default, rename = "endDate")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl RegistryEntry {
    /// Normalize into a record; entries without a name cannot be matched
    /// and are dropped. The name is kept verbatim for exact matching.
    pub fn into_record(self) -> Option<RegistryRecord> {
        let name = self.name.filter(|name| !name.trim().is_empty())?;
        Some(RegistryRecord {
            name,
            status: non_blank(self.status),
            start_date: non_blank(self.start_date),
            end_date: non_blank(self.end_date),
            description: non_blank(self.description),
        })
    }
}

/// Normalize a batch of entries, preserving order
pub fn into_records(entries: Vec<RegistryEntry>) -> Vec<RegistryRecord> {
    entries
        .into_iter()
        .filter_map(RegistryEntry::into_record)
        .collect()
}
