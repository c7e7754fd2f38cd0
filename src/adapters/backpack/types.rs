//! Backpack Types
//!
//! Response types for the markets, tickers and funding-rate endpoints.

use serde::Deserialize;

use crate::adapters::types::{deserialize_lenient_f64, deserialize_lenient_u64};

/// Suffix identifying USDC-margined perpetuals (`BTC_USDC_PERP`)
pub const PERP_MARKER: &str = "_USDC_PERP";

/// Base asset of a perpetual market symbol, `None` for spot markets.
pub fn perp_base(symbol: &str) -> Option<&str> {
    if !symbol.contains(PERP_MARKER) {
        return None;
    }
    symbol.split('_').next().filter(|base| !base.is_empty())
}

/// Entry of `GET /api/v1/markets`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackpackMarket {
    #[serde(default)]
    pub symbol: Option<String>,
    /// Settlement interval in milliseconds
    #[serde(default, deserialize_with = "deserialize_lenient_u64")]
    pub funding_interval: Option<u64>,
}

/// Entry of `GET /api/v1/tickers`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackpackTicker {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub last_price: Option<f64>,
}

/// Entry of `GET /api/v1/fundingRates?symbol=..&limit=1`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackpackFundingRate {
    /// Fractional rate for one settlement period (0.0000125 = 0.00125%)
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub funding_rate: Option<f64>,
}

/// A perpetual market selected from the markets listing
#[derive(Debug, Clone, PartialEq)]
pub struct PerpMarket {
    pub base: String,
    pub symbol: String,
    pub interval_ms: Option<u64>,
}
