//! Variational Types
//!
//! Response types for the `/metadata/stats` endpoint.

use serde::Deserialize;

use crate::adapters::types::{
    annualized_to_hourly_pct, deserialize_lenient_f64, deserialize_lenient_u64,
    InstrumentQuote, DEFAULT_SETTLEMENT_INTERVAL_SECS,
};

/// Top-level stats document; only the listings are used
#[derive(Debug, Clone, Deserialize)]
pub struct VariationalStats {
    #[serde(default)]
    pub listings: Vec<VariationalListing>,
}

/// One perpetual listing
#[derive(Debug, Clone, Deserialize)]
pub struct VariationalListing {
    #[serde(default)]
    pub ticker: Option<String>,
    /// Annualized decimal funding rate (0.1095 = 10.95%/yr)
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub funding_rate: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_u64")]
    pub funding_interval_s: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub mark_price: Option<f64>,
}

impl VariationalListing {
    /// Normalize into a quote; listings without a ticker are dropped.
    pub fn to_quote(&self) -> Option<InstrumentQuote> {
        let ticker = self.ticker.as_deref().filter(|t| !t.is_empty())?;
        let annual = self.funding_rate.unwrap_or(0.0);

        Some(InstrumentQuote {
            symbol: ticker.to_string(),
            price: Some(self.mark_price.unwrap_or(0.0)),
            funding_rate_per_hour: Some(annualized_to_hourly_pct(annual)),
            settlement_interval_secs: self
                .funding_interval_s
                .unwrap_or(DEFAULT_SETTLEMENT_INTERVAL_SECS),
        })
    }
}
