//! Presale Scout - Crypto Presale Scouting Library
//!
//! Filters top market listings for cheap, liquid, low-volatility assets,
//! keeps only those with a known presale or ICO entry, and attaches a
//! generated research summary to each.
//!
//! # Modules
//!
//! - `domain`: Core logic (CandidateFilter, cross-reference matcher, field extraction)
//! - `ports`: Trait abstractions (ListingSource, RegistrySource, AnalysisService)
//! - `adapters`: External implementations (CoinMarketCap, CryptoRank, ICO Drops, Gemini, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Scouting pipeline and single-project check

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
