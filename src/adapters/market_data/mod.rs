//! Market Data Adapters
//!
//! Primary listing feed for the scouting pipeline:
//! - `CoinMarketCapClient`: top-N assets by rank with USD quotes

mod coinmarketcap;

pub use coinmarketcap::{
    parse_listings, CoinMarketCapClient, CoinMarketCapConfig, DEFAULT_BASE_URL as COINMARKETCAP_BASE_URL,
};
