//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - Market Data: CoinMarketCap listings
//! - Registry: CryptoRank presales and the ICO Drops scraper
//! - Analysis: Gemini research summaries
//! - CLI: Command-line interface handlers
//!
//! `http` holds the client and retry plumbing the HTTP adapters share.

pub mod analysis;
pub mod cli;
pub mod http;
pub mod market_data;
pub mod registry;

pub use analysis::{GeminiClient, GeminiConfig};
pub use cli::CliApp;
pub use market_data::{CoinMarketCapClient, CoinMarketCapConfig};
pub use registry::{CryptoRankClient, CryptoRankConfig, IcoDropsConfig, IcoDropsScraper};
