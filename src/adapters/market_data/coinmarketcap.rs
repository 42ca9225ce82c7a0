//! CoinMarketCap Listings Client
//!
//! Reads the top-N assets by rank from `/v1/cryptocurrency/listings/latest`
//! and normalizes each into a [`MarketListing`] using the quote block of the
//! configured conversion currency (USD by default).

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::super::http::{join_url, require_key, send_with_retry, HttpSettings};
use crate::domain::MarketListing;
use crate::ports::{FetchOutcome, ListingSource, SourceError};

pub const DEFAULT_BASE_URL: &str = "https://pro-api.coinmarketcap.com";
const LISTINGS_PATH: &str = "/v1/cryptocurrency/listings/latest";
const SOURCE_NAME: &str = "coinmarketcap";
const API_KEY_NAME: &str = "CMC_API_KEY";

/// Configuration for the CoinMarketCap client
#[derive(Debug, Clone)]
pub struct CoinMarketCapConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    /// Number of assets to request, starting at rank 1
    pub limit: u32,
    /// Quote currency
    pub convert: String,
    pub http: HttpSettings,
}

impl Default for CoinMarketCapConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            limit: 100,
            convert: "USD".to_string(),
            http: HttpSettings::default(),
        }
    }
}

/// Market listing adapter backed by CoinMarketCap
#[derive(Debug, Clone)]
pub struct CoinMarketCapClient {
    config: CoinMarketCapConfig,
    http: Client,
}

impl CoinMarketCapClient {
    pub fn new(config: CoinMarketCapConfig) -> Result<Self, SourceError> {
        let http = config.http.build_client()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &CoinMarketCapConfig {
        &self.config
    }

    async fn try_fetch(&self) -> Result<Vec<MarketListing>, SourceError> {
        let api_key = require_key(self.config.api_key.as_deref(), API_KEY_NAME)?;
        let url = join_url(&self.config.base_url, LISTINGS_PATH);
        let limit = self.config.limit.to_string();
        let query = [
            ("start", "1"),
            ("limit", limit.as_str()),
            ("convert", self.config.convert.as_str()),
        ];

        let response = send_with_retry(&self.config.http.retry, SOURCE_NAME, || {
            self.http
                .get(&url)
                .header("Accepts", "application/json")
                .header("X-CMC_PRO_API_KEY", api_key)
                .query(&query)
                .send()
        })
        .await?;

        let body = response.text().await?;
        parse_listings(&body, &self.config.convert)
    }
}

#[async_trait]
impl ListingSource for CoinMarketCapClient {
    fn source_name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn fetch_listings(&self) -> FetchOutcome<MarketListing> {
        let result = self.try_fetch().await;
        match &result {
            Ok(listings) => tracing::info!("Fetched {} listings from {}", listings.len(), SOURCE_NAME),
            Err(e) => tracing::error!("{} listings unavailable: {}", SOURCE_NAME, e),
        }
        FetchOutcome::from_result(result)
    }
}

/// Parse a listings body, keeping the provider's rank order
///
/// Missing or null quote values become zero.
pub fn parse_listings(body: &str, convert: &str) -> Result<Vec<MarketListing>, SourceError> {
    let response: ListingsResponse = serde_json::from_str(body)?;

    Ok(response
        .data
        .into_iter()
        .map(|asset| {
            let quote = asset.quote.get(convert).cloned().unwrap_or_default();
            MarketListing {
                name: asset.name,
                symbol: asset.symbol,
                price: quote.price.unwrap_or_default(),
                volume_24h: quote.volume_24h.unwrap_or_default(),
                percent_change_7d: quote.percent_change_7d.unwrap_or_default(),
            }
        })
        .collect())
}

/// CoinMarketCap listings response
#[derive(Debug, Deserialize)]
struct ListingsResponse {
    data: Vec<CmcAsset>,
}

#[derive(Debug, Deserialize)]
struct CmcAsset {
    name: String,
    symbol: String,
    #[serde(default)]
    quote: HashMap<String, CmcQuote>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CmcQuote {
    #[serde(default)]
    price: Option<Decimal>,
    #[serde(default)]
    volume_24h: Option<Decimal>,
    #[serde(default)]
    percent_change_7d: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = r#"{
        "status": {"error_code": 0},
        "data": [
            {
                "id": 1,
                "name": "AlphaCoin",
                "symbol": "ALP",
                "cmc_rank": 1,
                "quote": {"USD": {"price": 0.5, "volume_24h": 500000, "percent_change_7d": 2.25}}
            },
            {
                "id": 2,
                "name": "BetaCoin",
                "symbol": "BET",
                "quote": {"USD": {"price": 12.5, "volume_24h": null, "percent_change_7d": -1.5}}
            }
        ]
    }"#;

    #[test]
    fn test_config_default() {
        let config = CoinMarketCapConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.limit, 100);
        assert_eq!(config.convert, "USD");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_parse_listings() {
        let listings = parse_listings(SAMPLE, "USD").unwrap();

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].name, "AlphaCoin");
        assert_eq!(listings[0].symbol, "ALP");
        assert_eq!(listings[0].price, dec!(0.5));
        assert_eq!(listings[0].volume_24h, dec!(500000));
        assert_eq!(listings[0].percent_change_7d, dec!(2.25));
        assert_eq!(listings[1].name, "BetaCoin");
        assert_eq!(listings[1].volume_24h, Decimal::ZERO);
    }

    #[test]
    fn test_parse_missing_quote_currency() {
        let listings = parse_listings(SAMPLE, "EUR").unwrap();
        assert_eq!(listings[0].price, Decimal::ZERO);
        assert_eq!(listings[0].volume_24h, Decimal::ZERO);
    }

    #[test]
    fn test_parse_malformed_body() {
        assert!(matches!(parse_listings("not json", "USD"), Err(SourceError::Parse(_))));
        assert!(matches!(parse_listings(r#"{"status": {}}"#, "USD"), Err(SourceError::Parse(_))));
    }

    #[test]
    fn test_parse_empty_data() {
        assert!(parse_listings(r#"{"data": []}"#, "USD").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_api_key_is_unavailable() {
        let client = CoinMarketCapClient::new(CoinMarketCapConfig::default()).unwrap();
        let outcome = client.fetch_listings().await;
        assert_eq!(
            outcome,
            FetchOutcome::Unavailable(SourceError::MissingCredential(API_KEY_NAME.to_string()))
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_unavailable() {
        let client = CoinMarketCapClient::new(CoinMarketCapConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            api_key: Some("test-key".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert!(client.fetch_listings().await.is_unavailable());
    }
}
