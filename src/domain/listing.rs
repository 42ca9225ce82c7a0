//! Listings and Registry Records
//!
//! Normalized records produced by the provider adapters. Records are
//! immutable once fetched and live only for the duration of one run.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Placeholder for any registry or analysis field that is not available
pub const UNKNOWN: &str = "Unknown";

/// A market-tracked asset and its current USD quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketListing {
    /// Asset name, used for cross-referencing registries
    pub name: String,
    /// Ticker symbol
    pub symbol: String,
    /// Current price in USD
    pub price: Decimal,
    /// 24-hour trading volume in USD
    pub volume_24h: Decimal,
    /// 7-day price change percentage (signed)
    pub percent_change_7d: Decimal,
}

impl MarketListing {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        price: Decimal,
        volume_24h: Decimal,
        percent_change_7d: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            price,
            volume_24h,
            percent_change_7d,
        }
    }
}

/// Auxiliary registry a record was fetched from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryKind {
    /// Authenticated ICO/presale registry API
    PresaleRegistry,
    /// Scraped upcoming-ICO listing page
    UpcomingIcoScraper,
}

impl RegistryKind {
    /// Match priority, lower wins
    pub fn priority(&self) -> u8 {
        match self {
            RegistryKind::PresaleRegistry => 0,
            RegistryKind::UpcomingIcoScraper => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RegistryKind::PresaleRegistry => "presale registry",
            RegistryKind::UpcomingIcoScraper => "upcoming-ICO scraper",
        }
    }
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An ICO/presale entry from an auxiliary registry
///
/// Optional fields are `None` when the source omitted them or sent a blank
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryRecord {
    pub name: String,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

impl RegistryRecord {
    /// Create a record with only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: None,
            start_date: None,
            end_date: None,
            description: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = non_blank(Some(status.into()));
        self
    }

    pub fn with_dates(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = non_blank(Some(start.into()));
        self.end_date = non_blank(Some(end.into()));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_blank(Some(description.into()));
        self
    }

    pub fn status_or_unknown(&self) -> &str {
        self.status.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn start_date_or_unknown(&self) -> &str {
        self.start_date.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn end_date_or_unknown(&self) -> &str {
        self.end_date.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn description_or_unknown(&self) -> &str {
        self.description.as_deref().unwrap_or(UNKNOWN)
    }
}

/// Collapse blank strings to `None`, trimming surrounding whitespace
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
