//! Shared types for venue adapters
//!
//! Normalized per-venue quotes and snapshots, HTTP client construction,
//! and the unit conversions that bring every venue onto a common
//! percent-per-hour funding scale.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use crate::adapters::errors::{ExchangeError, ExchangeResult};

// =============================================================================
// HTTP Client Configuration
// =============================================================================

/// Connection establishment timeout (milliseconds)
pub const HTTP_CONNECT_TIMEOUT_MS: u64 = 5_000;
/// Max idle connections kept per host
pub const HTTP_POOL_MAX_IDLE: usize = 16;
/// Idle connection lifetime (seconds)
pub const HTTP_POOL_IDLE_TIMEOUT_SECS: u64 = 90;

/// Create a reqwest client for one venue.
///
/// `timeout` bounds every request issued by the client; `proxy` routes all
/// traffic (HTTP and HTTPS) through a forward proxy when set.
pub fn create_http_client(
    venue: &str,
    timeout: Duration,
    proxy: Option<&str>,
) -> ExchangeResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_millis(HTTP_CONNECT_TIMEOUT_MS))
        .pool_max_idle_per_host(HTTP_POOL_MAX_IDLE)
        .pool_idle_timeout(Duration::from_secs(HTTP_POOL_IDLE_TIMEOUT_SECS));

    if let Some(url) = proxy {
        let proxy = reqwest::Proxy::all(url).map_err(|e| {
            ExchangeError::ConnectionFailed(format!("Invalid proxy URL '{}': {}", url, e))
        })?;
        builder = builder.proxy(proxy);
    }

    let client = builder.build().map_err(|e| {
        ExchangeError::ConnectionFailed(format!("Failed to build HTTP client: {}", e))
    })?;

    tracing::info!(
        phase = "init",
        venue = %venue,
        timeout_ms = timeout.as_millis() as u64,
        connect_timeout_ms = HTTP_CONNECT_TIMEOUT_MS,
        proxy = proxy.unwrap_or("none"),
        "HTTP client configured"
    );
    Ok(client)
}

// =============================================================================
// Unit Conversions
// =============================================================================

/// Hours in a (non-leap) year, the basis for annualized rates
pub const HOURS_PER_YEAR: f64 = 365.0 * 24.0;

/// Settlement interval assumed when a venue omits it
pub const DEFAULT_SETTLEMENT_INTERVAL_SECS: u64 = 3600;

/// Annualized decimal rate (0.1095 = 10.95%/yr) → percent per hour.
#[inline]
pub fn annualized_to_hourly_pct(annual_rate: f64) -> f64 {
    annual_rate * 100.0 / HOURS_PER_YEAR
}

/// Fractional rate (0.0000125) → percent units (0.00125).
#[inline]
pub fn fractional_to_pct(rate: f64) -> f64 {
    rate * 100.0
}

/// Settlement interval in milliseconds → seconds (integer division).
///
/// Absent or zero intervals fall back to one hour.
pub fn interval_ms_to_secs(interval_ms: Option<u64>) -> u64 {
    match interval_ms {
        Some(ms) if ms > 0 => ms / 1000,
        _ => DEFAULT_SETTLEMENT_INTERVAL_SECS,
    }
}

// =============================================================================
// Lenient Numeric Deserialization
// =============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// Accept `1.5`, `"1.5"` or `null`; venues are inconsistent about quoting
/// numbers. A string that is not a number is a shape error. Non-finite
/// values (`"NaN"`, `"inf"`) are treated as absent.
pub fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<NumberOrString>::deserialize(deserializer)? {
        None => None,
        Some(NumberOrString::Number(n)) => Some(n),
        Some(NumberOrString::Text(s)) => Some(s.trim().parse::<f64>().map_err(|e| {
            serde::de::Error::custom(format!("invalid number '{}': {}", s, e))
        })?),
    };
    Ok(value.filter(|v| v.is_finite()))
}

/// Integer flavour of [`deserialize_lenient_f64`] (fractions are truncated).
pub fn deserialize_lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = deserialize_lenient_f64(deserializer)?;
    Ok(value.map(|v| if v.is_finite() && v > 0.0 { v as u64 } else { 0 }))
}

// =============================================================================
// Instrument Quote / Venue Snapshot
// =============================================================================

/// Normalized quote for one instrument on one venue.
///
/// Funding is always percent per hour. `None` means the venue did not
/// report the field this cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstrumentQuote {
    pub symbol: String,
    pub price: Option<f64>,
    pub funding_rate_per_hour: Option<f64>,
    pub settlement_interval_secs: u64,
}

impl InstrumentQuote {
    pub fn new(symbol: impl Into<String>, settlement_interval_secs: u64) -> Self {
        Self {
            symbol: symbol.into(),
            price: None,
            funding_rate_per_hour: None,
            settlement_interval_secs,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_funding(mut self, funding_rate_per_hour: f64) -> Self {
        self.funding_rate_per_hour = Some(funding_rate_per_hour);
        self
    }

    /// Price with 0 standing in for "not reported"
    #[inline]
    pub fn price_or_zero(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    /// Funding with 0 standing in for "not reported"
    #[inline]
    pub fn funding_or_zero(&self) -> f64 {
        self.funding_rate_per_hour.unwrap_or(0.0)
    }
}

/// All quotes from one venue for one poll cycle.
///
/// A failed fetch yields an empty snapshot with `success == false`, never a
/// partial one. Quotes are keyed by the venue's own symbol spelling and
/// iterate in symbol order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VenueSnapshot {
    pub quotes: BTreeMap<String, InstrumentQuote>,
    pub success: bool,
}

impl VenueSnapshot {
    /// Successful snapshot from a set of quotes
    pub fn from_quotes(quotes: impl IntoIterator<Item = InstrumentQuote>) -> Self {
        Self {
            quotes: quotes.into_iter().map(|q| (q.symbol.clone(), q)).collect(),
            success: true,
        }
    }

    /// Empty snapshot marking a failed fetch
    pub fn failed() -> Self {
        Self::default()
    }

    pub fn get(&self, symbol: &str) -> Option<&InstrumentQuote> {
        self.quotes.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Number of quotes carrying a funding rate
    pub fn funding_count(&self) -> usize {
        self.quotes
            .values()
            .filter(|q| q.funding_rate_per_hour.is_some())
            .count()
    }
}
