//! Configuration Loader
//!
//! Loads and validates configuration from an optional TOML file. Every
//! section has defaults, so an empty file (or no file) yields a runnable
//! configuration once the market data key is available.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::adapters::analysis::{GeminiConfig, GEMINI_BASE_URL, GEMINI_MODEL};
use crate::adapters::http::{HttpSettings, RetryPolicy};
use crate::adapters::market_data::{CoinMarketCapConfig, COINMARKETCAP_BASE_URL};
use crate::adapters::registry::{
    CryptoRankConfig, IcoDropsConfig, APIFY_BASE_URL, CRYPTORANK_BASE_URL, ICODROPS_TARGET_URL,
};
use crate::application::{EnrichmentConfig, PipelineConfig, DEFAULT_FALLBACK_TEXT, DEFAULT_MAX_REPORTS};
use crate::domain::FilterConfig;

/// Used when no `--config` is given and the file exists
pub const DEFAULT_CONFIG_PATH: &str = "config/scout.toml";

pub const CMC_API_KEY_ENV: &str = "CMC_API_KEY";
pub const CRYPTO_RANK_API_KEY_ENV: &str = "CRYPTO_RANK_API_KEY";
pub const APIFY_API_KEY_ENV: &str = "APIFY_API_KEY";
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

const MAX_LISTING_LIMIT: u32 = 5000;
const MAX_RETRIES: u32 = 10;

/// Main configuration structure matching scout.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub filter: FilterConfig,
    pub pipeline: PipelineSection,
    pub market_data: MarketDataSection,
    pub presale_registry: PresaleRegistrySection,
    pub scraper: ScraperSection,
    pub analysis: AnalysisSection,
    pub http: HttpSection,
    pub logging: LoggingSection,
}

/// Pipeline configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineSection {
    /// Maximum reports per run
    pub max_reports: usize,
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            max_reports: DEFAULT_MAX_REPORTS,
        }
    }
}

/// Market listing provider section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketDataSection {
    pub base_url: String,
    /// Number of top-ranked assets to request
    pub listing_limit: u32,
    /// Quote currency
    pub convert: String,
    /// API key (falls back to CMC_API_KEY)
    pub api_key: Option<String>,
}

impl Default for MarketDataSection {
    fn default() -> Self {
        Self {
            base_url: COINMARKETCAP_BASE_URL.to_string(),
            listing_limit: 100,
            convert: "USD".to_string(),
            api_key: None,
        }
    }
}

impl MarketDataSection {
    /// Get API key with environment variable fallback
    pub fn get_api_key(&self) -> Option<String> {
        resolve_api_key(self.api_key.as_deref(), CMC_API_KEY_ENV)
    }
}

/// Presale registry section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PresaleRegistrySection {
    pub base_url: String,
    /// API key (falls back to CRYPTO_RANK_API_KEY)
    pub api_key: Option<String>,
}

impl Default for PresaleRegistrySection {
    fn default() -> Self {
        Self {
            base_url: CRYPTORANK_BASE_URL.to_string(),
            api_key: None,
        }
    }
}

impl PresaleRegistrySection {
    pub fn get_api_key(&self) -> Option<String> {
        resolve_api_key(self.api_key.as_deref(), CRYPTO_RANK_API_KEY_ENV)
    }
}

/// Upcoming-ICO scraper section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperSection {
    /// Disable to run with the presale registry only
    pub enabled: bool,
    /// Scraping service base URL
    pub base_url: String,
    /// Page to scrape
    pub target_url: String,
    /// API key (falls back to APIFY_API_KEY)
    pub api_key: Option<String>,
}

impl Default for ScraperSection {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: APIFY_BASE_URL.to_string(),
            target_url: ICODROPS_TARGET_URL.to_string(),
            api_key: None,
        }
    }
}

impl ScraperSection {
    pub fn get_api_key(&self) -> Option<String> {
        resolve_api_key(self.api_key.as_deref(), APIFY_API_KEY_ENV)
    }
}

/// Analysis service section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    pub base_url: String,
    pub model: String,
    /// Text used when the analysis call fails
    pub fallback_text: String,
    /// Truncate the raw analysis text (unset = unbounded)
    pub max_chars: Option<usize>,
    /// API key (falls back to GEMINI_API_KEY)
    pub api_key: Option<String>,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            base_url: GEMINI_BASE_URL.to_string(),
            model: GEMINI_MODEL.to_string(),
            fallback_text: DEFAULT_FALLBACK_TEXT.to_string(),
            max_chars: None,
            api_key: None,
        }
    }
}

impl AnalysisSection {
    pub fn get_api_key(&self) -> Option<String> {
        resolve_api_key(self.api_key.as_deref(), GEMINI_API_KEY_ENV)
    }
}

/// Shared HTTP section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSection {
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Extra attempts after the first (0 = single attempt)
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_retries: 0,
            retry_base_delay_ms: 500,
        }
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Load the given file, else `DEFAULT_CONFIG_PATH` if present, else defaults
pub fn load_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH),
        None => {
            tracing::debug!("No config file found, using built-in defaults");
            let config = Config::default();
            config.validate()?;
            Ok(config)
        }
    }
}

/// Configured value when non-blank, otherwise the environment variable
pub fn resolve_api_key(configured: Option<&str>, env_var: &str) -> Option<String> {
    if let Some(key) = configured.map(str::trim) {
        if !key.is_empty() {
            return Some(key.to_string());
        }
    }
    std::env::var(env_var)
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.filter
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        if self.pipeline.max_reports == 0 {
            return Err(ConfigError::ValidationError(
                "max_reports must be > 0".to_string(),
            ));
        }

        if self.market_data.listing_limit == 0 || self.market_data.listing_limit > MAX_LISTING_LIMIT {
            return Err(ConfigError::ValidationError(format!(
                "listing_limit must be 1-{}, got {}",
                MAX_LISTING_LIMIT, self.market_data.listing_limit
            )));
        }

        if self.market_data.convert.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "convert cannot be empty".to_string(),
            ));
        }

        let urls = [
            ("market_data.base_url", &self.market_data.base_url),
            ("presale_registry.base_url", &self.presale_registry.base_url),
            ("scraper.base_url", &self.scraper.base_url),
            ("scraper.target_url", &self.scraper.target_url),
            ("analysis.base_url", &self.analysis.base_url),
        ];
        for (field, url) in urls {
            if url.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{} cannot be empty",
                    field
                )));
            }
        }

        if self.analysis.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "analysis.model cannot be empty".to_string(),
            ));
        }

        if self.http.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be > 0".to_string(),
            ));
        }

        if self.http.max_retries > MAX_RETRIES {
            return Err(ConfigError::ValidationError(format!(
                "max_retries must be 0-{}, got {}",
                MAX_RETRIES, self.http.max_retries
            )));
        }

        Ok(())
    }

    /// Market data key, required before a run can start
    pub fn require_market_data_key(&self) -> Result<String, ConfigError> {
        self.market_data.get_api_key().ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "market data API key missing: set [market_data] api_key or {}",
                CMC_API_KEY_ENV
            ))
        })
    }

    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            timeout: Duration::from_secs(self.http.timeout_secs),
            retry: RetryPolicy {
                max_retries: self.http.max_retries,
                base_delay: Duration::from_millis(self.http.retry_base_delay_ms),
            },
        }
    }

    pub fn coinmarketcap_config(&self) -> CoinMarketCapConfig {
        CoinMarketCapConfig {
            base_url: self.market_data.base_url.clone(),
            api_key: self.market_data.get_api_key(),
            limit: self.market_data.listing_limit,
            convert: self.market_data.convert.clone(),
            http: self.http_settings(),
        }
    }

    pub fn cryptorank_config(&self) -> CryptoRankConfig {
        CryptoRankConfig {
            base_url: self.presale_registry.base_url.clone(),
            api_key: self.presale_registry.get_api_key(),
            http: self.http_settings(),
        }
    }

    pub fn icodrops_config(&self) -> IcoDropsConfig {
        IcoDropsConfig {
            base_url: self.scraper.base_url.clone(),
            target_url: self.scraper.target_url.clone(),
            api_key: self.scraper.get_api_key(),
            http: self.http_settings(),
        }
    }

    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig {
            base_url: self.analysis.base_url.clone(),
            model: self.analysis.model.clone(),
            api_key: self.analysis.get_api_key(),
            http: self.http_settings(),
        }
    }
}

// Conversion from Config to PipelineConfig
impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        PipelineConfig {
            filter: config.filter,
            max_reports: config.pipeline.max_reports,
            enrichment: EnrichmentConfig {
                fallback_text: config.analysis.fallback_text.clone(),
                max_chars: config.analysis.max_chars,
            },
        }
    }
}
