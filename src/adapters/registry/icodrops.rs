//! ICO Drops Upcoming-ICO Scraper
//!
//! Runs a synchronous Apify web-scraper job against the ICO Drops upcoming
//! category page. The page function selects every `.ico-card` element and
//! reads its `.ico-name`, `.ico-status`, `.ico-start-date`, `.ico-end-date`
//! and `.ico-description` children. The dataset comes back as a JSON array
//! with one entry per card.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use super::super::http::{join_url, require_key, send_with_retry, HttpSettings};
use super::types::{into_records, RegistryEntry};
use crate::domain::{RegistryKind, RegistryRecord};
use crate::ports::{FetchOutcome, RegistrySource, SourceError};

pub const DEFAULT_BASE_URL: &str = "https://api.apify.com";
pub const DEFAULT_TARGET_URL: &str = "https://icodrops.com/category/upcoming-ico/";
const RUN_SYNC_PATH: &str = "/v2/acts/apify~web-scraper/run-sync-get-dataset-items";
const SOURCE_NAME: &str = "icodrops";
const API_KEY_NAME: &str = "APIFY_API_KEY";

/// Extraction routine executed by the scraper for each page
pub const PAGE_FUNCTION: &str = r#"async function pageFunction(context) {
    const { $ } = context;
    const data = [];
    $('.ico-card').each((index, element) => {
        const name = $(element).find('.ico-name').text().trim();
        const status = $(element).find('.ico-status').text().trim();
        const startDate = $(element).find('.ico-start-date').text().trim();
        const endDate = $(element).find('.ico-end-date').text().trim();
        const description = $(element).find('.ico-description').text().trim();
        data.push({ name, status, startDate, endDate, description });
    });
    return data;
}"#;

/// Configuration for the scraper client
#[derive(Debug, Clone)]
pub struct IcoDropsConfig {
    /// Scraping service base URL
    pub base_url: String,
    /// Page to scrape
    pub target_url: String,
    pub api_key: Option<String>,
    pub http: HttpSettings,
}

impl Default for IcoDropsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            target_url: DEFAULT_TARGET_URL.to_string(),
            api_key: None,
            http: HttpSettings::default(),
        }
    }
}

/// Upcoming-ICO registry adapter backed by a scrape job
#[derive(Debug, Clone)]
pub struct IcoDropsScraper {
    config: IcoDropsConfig,
    http: Client,
}

impl IcoDropsScraper {
    pub fn new(config: IcoDropsConfig) -> Result<Self, SourceError> {
        let http = config.http.build_client()?;
        Ok(Self { config, http })
    }

    /// JSON body of the scrape-job request
    pub fn job_request(&self) -> serde_json::Value {
        json!({
            "startUrls": [{ "url": self.config.target_url }],
            "pageFunction": PAGE_FUNCTION,
        })
    }

    async fn try_fetch(&self) -> Result<Vec<RegistryRecord>, SourceError> {
        let api_key = require_key(self.config.api_key.as_deref(), API_KEY_NAME)?;
        let url = join_url(&self.config.base_url, RUN_SYNC_PATH);
        let request_body = self.job_request();

        let response = send_with_retry(&self.config.http.retry, SOURCE_NAME, || {
            self.http
                .post(&url)
                .bearer_auth(api_key)
                .json(&request_body)
                .send()
        })
        .await?;

        let body = response.text().await?;
        parse_dataset(&body)
    }
}

#[async_trait]
impl RegistrySource for IcoDropsScraper {
    fn kind(&self) -> RegistryKind {
        RegistryKind::UpcomingIcoScraper
    }

    async fn fetch_records(&self) -> FetchOutcome<RegistryRecord> {
        let result = self.try_fetch().await;
        if let Ok(records) = &result {
            tracing::debug!("Scraped {} entries from {}", records.len(), SOURCE_NAME);
        }
        FetchOutcome::from_result(result)
    }
}

/// Parse the dataset items array
pub fn parse_dataset(body: &str) -> Result<Vec<RegistryRecord>, SourceError> {
    let entries: Vec<RegistryEntry> = serde_json::from_str(body)?;
    Ok(into_records(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = IcoDropsConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.target_url, DEFAULT_TARGET_URL);
    }

    #[test]
    fn test_job_request_shape() {
        let scraper = IcoDropsScraper::new(IcoDropsConfig {
            target_url: "https://example.com/upcoming".to_string(),
            ..Default::default()
        })
        .unwrap();

        let body = scraper.job_request();
        assert_eq!(body["startUrls"][0]["url"], "https://example.com/upcoming");
        let page_function = body["pageFunction"].as_str().unwrap();
        assert!(page_function.contains(".ico-card"));
        assert!(page_function.contains(".ico-start-date"));
    }

    #[test]
    fn test_parse_dataset() {
        let body = r##"[
            {"name": "GammaCoin", "status": "Upcoming", "startDate": "Mar 1", "endDate": "Mar 14", "description": "L2 gaming"},
            {"name": "", "status": "", "startDate": "", "endDate": "", "description": ""},
            {"#error": true, "url": "https://icodrops.com/category/upcoming-ico/"}
        ]"##;

        let records = parse_dataset(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "GammaCoin");
        assert_eq!(records[0].description_or_unknown(), "L2 gaming");
    }

    #[test]
    fn test_parse_non_array_is_error() {
        assert!(matches!(parse_dataset(r#"{"error": "quota"}"#), Err(SourceError::Parse(_))));
    }

    #[tokio::test]
    async fn test_missing_api_key_is_unavailable() {
        let scraper = IcoDropsScraper::new(IcoDropsConfig::default()).unwrap();
        assert_eq!(scraper.kind(), RegistryKind::UpcomingIcoScraper);
        assert!(scraper.fetch_records().await.is_unavailable());
    }
}
