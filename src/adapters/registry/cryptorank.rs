//! CryptoRank Presale Registry Client
//!
//! Bearer-authenticated read of all known ICO/presale entries from
//! `/v1/icos`. The response carries a top-level `data` array.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::super::http::{join_url, require_key, send_with_retry, HttpSettings};
use super::types::{into_records, RegistryEntry};
use crate::domain::{RegistryKind, RegistryRecord};
use crate::ports::{FetchOutcome, RegistrySource, SourceError};

pub const DEFAULT_BASE_URL: &str = "https://api.cryptorank.io";
const ICOS_PATH: &str = "/v1/icos";
const SOURCE_NAME: &str = "cryptorank";
const API_KEY_NAME: &str = "CRYPTO_RANK_API_KEY";

/// Configuration for the CryptoRank client
#[derive(Debug, Clone)]
pub struct CryptoRankConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub http: HttpSettings,
}

impl Default for CryptoRankConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            http: HttpSettings::default(),
        }
    }
}

/// Presale registry adapter backed by CryptoRank
#[derive(Debug, Clone)]
pub struct CryptoRankClient {
    config: CryptoRankConfig,
    http: Client,
}

impl CryptoRankClient {
    pub fn new(config: CryptoRankConfig) -> Result<Self, SourceError> {
        let http = config.http.build_client()?;
        Ok(Self { config, http })
    }

    async fn try_fetch(&self) -> Result<Vec<RegistryRecord>, SourceError> {
        let api_key = require_key(self.config.api_key.as_deref(), API_KEY_NAME)?;
        let url = join_url(&self.config.base_url, ICOS_PATH);

        let response = send_with_retry(&self.config.http.retry, SOURCE_NAME, || {
            self.http.get(&url).bearer_auth(api_key).send()
        })
        .await?;

        let body = response.text().await?;
        parse_icos(&body)
    }
}

#[async_trait]
impl RegistrySource for CryptoRankClient {
    fn kind(&self) -> RegistryKind {
        RegistryKind::PresaleRegistry
    }

    async fn fetch_records(&self) -> FetchOutcome<RegistryRecord> {
        let result = self.try_fetch().await;
        if let Ok(records) = &result {
            tracing::debug!("Fetched {} entries from {}", records.len(), SOURCE_NAME);
        }
        FetchOutcome::from_result(result)
    }
}

/// Parse a `/v1/icos` body
pub fn parse_icos(body: &str) -> Result<Vec<RegistryRecord>, SourceError> {
    let response: IcosResponse = serde_json::from_str(body)?;
    Ok(into_records(response.data))
}

#[derive(Debug, Deserialize)]
struct IcosResponse {
    data: Vec<RegistryEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CryptoRankConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_parse_icos() {
        let body = r#"{
            "data": [
                {"name": "AlphaCoin", "status": "Upcoming", "startDate": "2024-01-01", "endDate": "2024-02-01", "description": "test token"},
                {"name": "BetaCoin", "status": "Active"}
            ]
        }"#;

        let records = parse_icos(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status_or_unknown(), "Upcoming");
        assert_eq!(records[0].end_date_or_unknown(), "2024-02-01");
        assert_eq!(records[1].start_date_or_unknown(), "Unknown");
    }

    #[test]
    fn test_parse_missing_data_is_error() {
        assert!(matches!(parse_icos(r#"{"items": []}"#), Err(SourceError::Parse(_))));
        assert!(matches!(parse_icos("<html>"), Err(SourceError::Parse(_))));
    }

    #[tokio::test]
    async fn test_missing_api_key_is_unavailable() {
        let client = CryptoRankClient::new(CryptoRankConfig::default()).unwrap();
        assert_eq!(client.kind(), RegistryKind::PresaleRegistry);
        assert!(client.fetch_records().await.is_unavailable());
    }
}
