//! Registry Adapters
//!
//! Auxiliary ICO/presale sources used to corroborate market listings:
//! - `CryptoRankClient`: presale registry API (highest match priority)
//! - `IcoDropsScraper`: upcoming-ICO page scraped through a scrape job
//!
//! A failing registry never fails a run; it contributes no records.

mod cryptorank;
mod icodrops;
mod types;

pub use cryptorank::{parse_icos, CryptoRankClient, CryptoRankConfig, DEFAULT_BASE_URL as CRYPTORANK_BASE_URL};
pub use icodrops::{
    parse_dataset, IcoDropsConfig, IcoDropsScraper, DEFAULT_BASE_URL as APIFY_BASE_URL,
    DEFAULT_TARGET_URL as ICODROPS_TARGET_URL, PAGE_FUNCTION,
};
pub use types::RegistryEntry;
