//! Backpack Adapter Implementation
//!
//! Three stages per cycle:
//! 1. `GET /api/v1/markets` for the perpetual universe and settlement intervals
//! 2. `GET /api/v1/tickers` for last prices (failure here only loses prices)
//! 3. `GET /api/v1/fundingRates` once per selected perpetual, bounded fan-out

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use serde::de::DeserializeOwned;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::traits::VenueAdapter;
use crate::adapters::types::{
    create_http_client, fractional_to_pct, interval_ms_to_secs, InstrumentQuote, VenueSnapshot,
};

use super::config::BackpackConfig;
use super::types::{perp_base, BackpackFundingRate, BackpackMarket, BackpackTicker, PerpMarket};

const MARKETS_PATH: &str = "/api/v1/markets";
const TICKERS_PATH: &str = "/api/v1/tickers";
const FUNDING_RATES_PATH: &str = "/api/v1/fundingRates";

/// Backpack venue adapter
pub struct BackpackAdapter {
    config: BackpackConfig,
    http: reqwest::Client,
}

impl BackpackAdapter {
    /// Create a new adapter routed through `config.proxy_url` when set.
    pub fn new(config: BackpackConfig) -> ExchangeResult<Self> {
        let http = create_http_client("backpack", config.timeout(), config.proxy_url.as_deref())?;
        Ok(Self { config, http })
    }

    /// Fetch a snapshot, restricting funding calls to `allow_list` when given.
    ///
    /// Allow-list entries are Backpack base symbols; entries with no listed
    /// perpetual are ignored. An empty or absent list falls back to the first
    /// `max_symbols` perpetuals in listing order.
    pub async fn fetch_with_allow_list(&self, allow_list: Option<&[String]>) -> VenueSnapshot {
        let started = Instant::now();
        match self.try_fetch(allow_list).await {
            Ok(snapshot) => {
                tracing::debug!(
                    venue = "backpack",
                    instruments = snapshot.len(),
                    with_funding = snapshot.funding_count(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Snapshot fetched"
                );
                snapshot
            }
            Err(e) => {
                tracing::warn!(
                    venue = "backpack",
                    error = %e,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Fetch failed, using empty snapshot"
                );
                VenueSnapshot::failed()
            }
        }
    }

    /// Fetch and normalize, surfacing the failure reason of the markets stage.
    pub async fn try_fetch(&self, allow_list: Option<&[String]>) -> ExchangeResult<VenueSnapshot> {
        let markets: Vec<BackpackMarket> = self.get_json(MARKETS_PATH, &[]).await?;
        let perps = collect_perps(&markets);

        let prices = match self.fetch_prices().await {
            Ok(prices) => prices,
            Err(e) => {
                tracing::warn!(
                    venue = "backpack",
                    error = %e,
                    "Ticker fetch failed, prices unavailable"
                );
                HashMap::new()
            }
        };

        let targets = select_funding_targets(&perps, allow_list, self.config.max_symbols);
        let funding = self.fetch_funding_rates(&targets).await;

        tracing::debug!(
            venue = "backpack",
            perps = perps.len(),
            priced = prices.len(),
            funding_requested = targets.len(),
            funding_received = funding.len(),
            "Backpack stages complete"
        );

        Ok(VenueSnapshot::from_quotes(perps.iter().map(|perp| {
            let mut quote =
                InstrumentQuote::new(perp.base.clone(), interval_ms_to_secs(perp.interval_ms));
            if let Some(&price) = prices.get(&perp.base) {
                quote = quote.with_price(price);
            }
            if let Some(&rate) = funding.get(&perp.base) {
                quote = quote.with_funding(fractional_to_pct(rate));
            }
            quote
        })))
    }

    /// Last price per base symbol, keeping only positive prices.
    async fn fetch_prices(&self) -> ExchangeResult<HashMap<String, f64>> {
        let tickers: Vec<BackpackTicker> = self.get_json(TICKERS_PATH, &[]).await?;
        Ok(tickers
            .into_iter()
            .filter_map(|t| {
                let base = perp_base(t.symbol.as_deref()?)?.to_string();
                let price = t.last_price.filter(|p| *p > 0.0)?;
                Some((base, price))
            })
            .collect())
    }

    /// Latest fractional funding rate per base symbol.
    ///
    /// Individual failures are logged and omitted; results are keyed by symbol
    /// so completion order does not matter.
    async fn fetch_funding_rates(&self, targets: &[&PerpMarket]) -> HashMap<String, f64> {
        let concurrency = self.config.funding_concurrency.max(1);
        let pairs: Vec<(String, String)> = targets
            .iter()
            .map(|p| (p.base.clone(), p.symbol.clone()))
            .collect();

        let results: Vec<(String, ExchangeResult<Option<f64>>)> = stream::iter(pairs)
            .map(|(base, symbol)| async move {
                let result = self.fetch_funding_rate(&symbol).await;
                (base, result)
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        let mut rates = HashMap::with_capacity(results.len());
        for (base, result) in results {
            match result {
                Ok(Some(rate)) => {
                    rates.insert(base, rate);
                }
                Ok(None) => {
                    tracing::debug!(venue = "backpack", symbol = %base, "No funding history");
                }
                Err(e) => {
                    tracing::debug!(
                        venue = "backpack",
                        symbol = %base,
                        error = %e,
                        "Funding fetch failed"
                    );
                }
            }
        }
        rates
    }

    async fn fetch_funding_rate(&self, market_symbol: &str) -> ExchangeResult<Option<f64>> {
        let history: Vec<BackpackFundingRate> = self
            .get_json(FUNDING_RATES_PATH, &[("symbol", market_symbol), ("limit", "1")])
            .await?;
        Ok(history.first().and_then(|entry| entry.funding_rate))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ExchangeResult<T> {
        let url = self.config.endpoint(path);
        let timeout_ms = self.config.timeout().as_millis() as u64;

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ExchangeError::from_transport(e, timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExchangeError::HttpStatus {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ExchangeError::from_transport(e, timeout_ms))?;

        serde_json::from_str(&body)
            .map_err(|e| ExchangeError::InvalidResponse(format!("{}: {}", path, e)))
    }
}

/// Perpetual markets in listing order, first occurrence of each base wins.
fn collect_perps(markets: &[BackpackMarket]) -> Vec<PerpMarket> {
    let mut seen = HashSet::new();
    markets
        .iter()
        .filter_map(|m| {
            let symbol = m.symbol.as_deref()?;
            let base = perp_base(symbol)?;
            seen.insert(base.to_string()).then(|| PerpMarket {
                base: base.to_string(),
                symbol: symbol.to_string(),
                interval_ms: m.funding_interval,
            })
        })
        .collect()
}

/// Perpetuals whose funding rate is requested this cycle.
fn select_funding_targets<'a>(
    perps: &'a [PerpMarket],
    allow_list: Option<&[String]>,
    max_symbols: usize,
) -> Vec<&'a PerpMarket> {
    match allow_list {
        Some(list) if !list.is_empty() => {
            let by_base: HashMap<&str, &PerpMarket> =
                perps.iter().map(|p| (p.base.as_str(), p)).collect();
            let mut seen = HashSet::new();
            list.iter()
                .filter(|s| seen.insert(s.as_str()))
                .filter_map(|s| by_base.get(s.as_str()).copied())
                .collect()
        }
        _ => perps.iter().take(max_symbols).collect(),
    }
}

#[async_trait]
impl VenueAdapter for BackpackAdapter {
    async fn fetch(&self) -> VenueSnapshot {
        self.fetch_with_allow_list(None).await
    }

    fn venue_name(&self) -> &'static str {
        "backpack"
    }
}
