//! Variational Adapter Implementation
//!
//! One GET against the stats endpoint per cycle. No proxy.

use std::time::Instant;

use async_trait::async_trait;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::traits::VenueAdapter;
use crate::adapters::types::{create_http_client, VenueSnapshot};

use super::config::VariationalConfig;
use super::types::VariationalStats;

/// Variational venue adapter
pub struct VariationalAdapter {
    config: VariationalConfig,
    http: reqwest::Client,
}

impl VariationalAdapter {
    /// Create a new adapter; fails only if the HTTP client cannot be built.
    pub fn new(config: VariationalConfig) -> ExchangeResult<Self> {
        let http = create_http_client("variational", config.timeout(), None)?;
        Ok(Self { config, http })
    }

    /// Fetch and normalize, surfacing the failure reason.
    pub async fn try_fetch(&self) -> ExchangeResult<VenueSnapshot> {
        let timeout_ms = self.config.timeout().as_millis() as u64;

        let response = self
            .http
            .get(&self.config.stats_url)
            .send()
            .await
            .map_err(|e| ExchangeError::from_transport(e, timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExchangeError::HttpStatus {
                endpoint: self.config.stats_url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ExchangeError::from_transport(e, timeout_ms))?;

        let stats: VariationalStats = serde_json::from_str(&body).map_err(|e| {
            ExchangeError::InvalidResponse(format!("stats JSON: {}", e))
        })?;

        let skipped = stats.listings.iter().filter(|l| l.to_quote().is_none()).count();
        if skipped > 0 {
            tracing::debug!(venue = "variational", skipped, "Listings without ticker skipped");
        }

        Ok(VenueSnapshot::from_quotes(
            stats.listings.iter().filter_map(|l| l.to_quote()),
        ))
    }
}

#[async_trait]
impl VenueAdapter for VariationalAdapter {
    async fn fetch(&self) -> VenueSnapshot {
        let started = Instant::now();
        match self.try_fetch().await {
            Ok(snapshot) => {
                tracing::debug!(
                    venue = "variational",
                    instruments = snapshot.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Snapshot fetched"
                );
                snapshot
            }
            Err(e) => {
                tracing::warn!(
                    venue = "variational",
                    error = %e,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Fetch failed, using empty snapshot"
                );
                VenueSnapshot::failed()
            }
        }
    }

    fn venue_name(&self) -> &'static str {
        "variational"
    }
}
