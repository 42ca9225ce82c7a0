//! Candidate Filter
//!
//! Admission thresholds for market listings. A listing is a candidate when it
//! is cheap, liquid enough to be real, and has not moved much over the past
//! week:
//!
//! - `price < max_price`
//! - `volume_24h > min_volume_24h`
//! - `|percent_change_7d| < max_abs_change_7d`

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::listing::MarketListing;

/// Reason a listing was not admitted
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    #[error("price {price} is not below {max}")]
    PriceTooHigh { price: Decimal, max: Decimal },

    #[error("24h volume {volume} is not above {min}")]
    InsufficientVolume { volume: Decimal, min: Decimal },

    #[error("7d change {change}% is outside ±{max}%")]
    TooVolatile { change: Decimal, max: Decimal },
}

/// Invalid threshold configuration
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid filter threshold: {0}")]
pub struct FilterConfigError(pub String);

/// Admission thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Exclusive upper bound on USD price
    pub max_price: Decimal,
    /// Exclusive lower bound on 24h USD volume
    pub min_volume_24h: Decimal,
    /// Exclusive bound on the absolute 7d change percentage
    pub max_abs_change_7d: Decimal,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_price: dec!(1.0),
            min_volume_24h: dec!(100000),
            max_abs_change_7d: dec!(5),
        }
    }
}

impl FilterConfig {
    pub fn with_max_price(mut self, max_price: Decimal) -> Self {
        self.max_price = max_price;
        self
    }

    pub fn with_min_volume(mut self, min_volume_24h: Decimal) -> Self {
        self.min_volume_24h = min_volume_24h;
        self
    }

    pub fn with_max_abs_change(mut self, max_abs_change_7d: Decimal) -> Self {
        self.max_abs_change_7d = max_abs_change_7d;
        self
    }

    pub fn validate(&self) -> Result<(), FilterConfigError> {
        if self.max_price <= Decimal::ZERO {
            return Err(FilterConfigError(format!(
                "max_price must be > 0, got {}",
                self.max_price
            )));
        }
        if self.min_volume_24h.is_sign_negative() {
            return Err(FilterConfigError(format!(
                "min_volume_24h must be >= 0, got {}",
                self.min_volume_24h
            )));
        }
        if self.max_abs_change_7d <= Decimal::ZERO {
            return Err(FilterConfigError(format!(
                "max_abs_change_7d must be > 0, got {}",
                self.max_abs_change_7d
            )));
        }
        Ok(())
    }
}

/// Pure admission check over market listings
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    config: FilterConfig,
}

impl CandidateFilter {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn is_candidate(&self, listing: &MarketListing) -> bool {
        self.check(listing).is_ok()
    }

    /// Check a listing, reporting the first failed threshold
    pub fn check(&self, listing: &MarketListing) -> Result<(), Rejection> {
        if listing.price >= self.config.max_price {
            return Err(Rejection::PriceTooHigh {
                price: listing.price,
                max: self.config.max_price,
            });
        }

        if listing.volume_24h <= self.config.min_volume_24h {
            return Err(Rejection::InsufficientVolume {
                volume: listing.volume_24h,
                min: self.config.min_volume_24h,
            });
        }

        if listing.percent_change_7d.abs() >= self.config.max_abs_change_7d {
            return Err(Rejection::TooVolatile {
                change: listing.percent_change_7d,
                max: self.config.max_abs_change_7d,
            });
        }

        Ok(())
    }
}
