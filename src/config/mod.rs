//! Configuration Module
//!
//! Loads and validates configuration from TOML files, with API keys falling
//! back to environment variables.

pub mod loader;

pub use loader::{
    load_config, load_or_default, resolve_api_key, AnalysisSection, Config, ConfigError,
    HttpSection, LoggingSection, MarketDataSection, PipelineSection, PresaleRegistrySection,
    ScraperSection, DEFAULT_CONFIG_PATH,
};
