//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, these traits abstract:
//! - The primary market listing feed
//! - Auxiliary ICO/presale registries
//! - The generative analysis service

pub mod models;
pub mod mocks;

use async_trait::async_trait;

use crate::domain::{MarketListing, RegistryKind, RegistryRecord};

pub use models::{FetchOutcome, SourceError};

/// Primary market listing source
///
/// `Unavailable` from this port aborts the run.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Short name used in logs and abort reasons
    fn source_name(&self) -> &'static str;

    /// Fetch listings in the provider's rank order
    async fn fetch_listings(&self) -> FetchOutcome<MarketListing>;
}

/// Auxiliary registry of ICO/presale entries
///
/// Any outcome from this port degrades to an empty record set.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrySource: Send + Sync {
    /// Which registry this source feeds, which also fixes its match priority
    fn kind(&self) -> RegistryKind;

    async fn fetch_records(&self) -> FetchOutcome<RegistryRecord>;
}

/// Generative research service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Request a free-text research summary for a project
    async fn analyze(&self, project_name: &str) -> Result<String, SourceError>;
}
