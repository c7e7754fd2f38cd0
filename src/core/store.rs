//! Aggregate store for the latest joined view
//!
//! Single writer (the poll task), many readers (HTTP handlers). Each
//! publish builds a complete new view and swaps it in under a short write
//! lock; readers clone the `Arc` and release the lock immediately, so a
//! reader sees either the old view or the new one, never a mix.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Local};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::core::spread::{ComparisonRecord, SymbolCounts};

/// Rendered in place of `last_update` before the first cycle
pub const NEVER_UPDATED: &str = "-";

/// Run statistics as exposed by the read API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub total_symbols: usize,
    pub common_count: usize,
    pub high_funding_count: usize,
    pub update_count: u64,
    pub runtime_seconds: u64,
    /// Local wall-clock `HH:MM:SS`, or `-` before the first cycle
    pub last_update: String,
}

/// Read API document: ranked records plus statistics
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse {
    pub summary: Vec<ComparisonRecord>,
    pub stats: StoreStats,
}

#[derive(Debug, Default)]
struct PublishedView {
    records: Vec<ComparisonRecord>,
    counts: SymbolCounts,
    update_count: u64,
    last_update: Option<DateTime<Local>>,
}

/// Latest published view plus run statistics
#[derive(Debug)]
pub struct AggregateStore {
    current: RwLock<Arc<PublishedView>>,
    started_at: Instant,
}

impl Default for AggregateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AggregateStore {
    /// Empty store; reads return a well-formed empty document.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(PublishedView::default())),
            started_at: Instant::now(),
        }
    }

    /// Swap in a new view, bump `update_count` and stamp `last_update`.
    ///
    /// Returns the new update count.
    pub async fn replace(&self, records: Vec<ComparisonRecord>, counts: SymbolCounts) -> u64 {
        let mut guard = self.current.write().await;
        let update_count = guard.update_count + 1;
        *guard = Arc::new(PublishedView {
            records,
            counts,
            update_count,
            last_update: Some(Local::now()),
        });
        update_count
    }

    /// Current records (top `limit` when `Some(n > 0)`) with statistics.
    pub async fn read(&self, limit: Option<usize>) -> DataResponse {
        let view = self.current.read().await.clone();
        let take = match limit {
            Some(n) if n > 0 => n,
            _ => view.records.len(),
        };
        DataResponse {
            summary: view.records.iter().take(take).cloned().collect(),
            stats: self.stats_for(&view),
        }
    }

    pub async fn stats(&self) -> StoreStats {
        let view = self.current.read().await.clone();
        self.stats_for(&view)
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    fn stats_for(&self, view: &PublishedView) -> StoreStats {
        StoreStats {
            total_symbols: view.counts.total_symbols,
            common_count: view.counts.common_count,
            high_funding_count: view.counts.high_funding_count,
            update_count: view.update_count,
            runtime_seconds: self.uptime_secs(),
            last_update: view
                .last_update
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| NEVER_UPDATED.to_string()),
        }
    }
}
