//! End-to-End Integration Tests
//!
//! This module tests the complete monitoring cycle:
//! 1. Venue snapshots from mock adapters
//! 2. Symbol reconciliation and join
//! 3. Classification and ranking
//! 4. Publication into the aggregate store
//! 5. Reads through the store as the HTTP layer sees them
//!
//! # Running the tests
//! ```bash
//! cargo test --test full_cycle
//! ```

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{broadcast, Mutex};

use funding_monitor::adapters::types::{InstrumentQuote, VenueSnapshot};
use funding_monitor::adapters::VenueAdapter;
use funding_monitor::config::SymbolsConfig;
use funding_monitor::core::{
    poll_task, run_poll_cycle, AggregateStore, RecommendationThresholds, SpreadEngine, Tier,
};

// =============================================================================
// Mock Venue Adapter
// =============================================================================

/// Mock venue adapter serving queued snapshots.
///
/// Each `fetch()` pops the next queued snapshot; once the queue is drained
/// the last one is repeated.
pub struct MockVenueAdapter {
    name: &'static str,
    queue: Mutex<Vec<VenueSnapshot>>,
    last: Mutex<VenueSnapshot>,
    fetches: AtomicUsize,
}

impl MockVenueAdapter {
    pub fn new(name: &'static str, snapshots: Vec<VenueSnapshot>) -> Self {
        let mut queue = snapshots;
        queue.reverse();
        Self {
            name,
            queue: Mutex::new(queue),
            last: Mutex::new(VenueSnapshot::failed()),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fixed(name: &'static str, snapshot: VenueSnapshot) -> Self {
        Self::new(name, vec![snapshot])
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VenueAdapter for MockVenueAdapter {
    async fn fetch(&self) -> VenueSnapshot {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let mut last = self.last.lock().await;
        if let Some(next) = self.queue.lock().await.pop() {
            *last = next;
        }
        last.clone()
    }

    fn venue_name(&self) -> &'static str {
        self.name
    }
}

// =============================================================================
// Fixtures
// =============================================================================

fn quote(symbol: &str, price: f64, funding: f64) -> InstrumentQuote {
    InstrumentQuote::new(symbol, 3600).with_price(price).with_funding(funding)
}

fn variational_snapshot() -> VenueSnapshot {
    VenueSnapshot::from_quotes(vec![
        quote("BTC", 97_000.0, 0.00125),
        quote("ETH", 3_400.0, 0.015),
        quote("PUMPFUN", 0.0042, -0.02),
        quote("BONK", 0.00002, 0.03),
        quote("PEPE", 0.00001, 0.012),
    ])
}

fn backpack_snapshot() -> VenueSnapshot {
    VenueSnapshot::from_quotes(vec![
        InstrumentQuote::new("BTC", 28_800)
            .with_price(97_097.0)
            .with_funding(0.00125),
        quote("ETH", 3_401.0, 0.001),
        quote("PUMP", 0.0043, 0.005),
        quote("kBONK", 0.02, 0.001),
        quote("kPEPE", 0.01, 0.001),
        quote("WIF", 2.1, 0.004),
        // No price: not joined, still counted in total_symbols
        InstrumentQuote::new("NEW", 3600).with_funding(0.002),
        // No funding: neither joined nor counted
        InstrumentQuote::new("OLD", 3600).with_price(1.0),
    ])
}

// =============================================================================
// Full cycle
// =============================================================================

#[tokio::test]
async fn test_store_is_empty_before_first_cycle() {
    let store = AggregateStore::new();
    let data = store.read(None).await;
    assert!(data.summary.is_empty());
    assert_eq!(data.stats.update_count, 0);
    assert_eq!(data.stats.last_update, "-");

    let json = serde_json::to_value(&data).unwrap();
    assert!(json["summary"].is_array());
    assert!(json["stats"]["runtime_seconds"].is_u64());
}

#[tokio::test]
async fn test_full_cycle_join_rank_and_stats() {
    let a = MockVenueAdapter::fixed("variational", variational_snapshot());
    let b = MockVenueAdapter::fixed("backpack", backpack_snapshot());
    let store = AggregateStore::new();

    let report = run_poll_cycle(&a, &b, &SpreadEngine::default(), &store).await;
    assert_eq!(report.records, 4);
    assert_eq!(a.fetch_count(), 1);
    assert_eq!(b.fetch_count(), 1);

    let data = store.read(None).await;
    let symbols: Vec<&str> = data.summary.iter().map(|r| r.symbol.as_str()).collect();
    // |diff|: PUMP 0.025, ETH 0.014, WIF 0.004, BTC 0
    assert_eq!(symbols, vec!["PUMP", "ETH", "WIF", "BTC"]);

    let pump = &data.summary[0];
    assert_eq!(pump.canonical_symbol, "PUMPFUN");
    assert_eq!(pump.recommendation.tier, Tier::Strong);
    assert_eq!(pump.recommendation.direction, "short Backpack / long Variational");

    let eth = &data.summary[1];
    assert_eq!(eth.recommendation.tier, Tier::Recommended);
    assert_eq!(eth.recommendation.direction, "short Variational / long Backpack");

    let wif = &data.summary[2];
    assert!(!wif.has_venue_a_data);
    assert_eq!(wif.venue_a_price, 0.0);
    assert_eq!(wif.recommendation.tier, Tier::None);
    assert_eq!(wif.recommendation.direction, "");

    let btc = &data.summary[3];
    assert_eq!(btc.venue_b_interval, 28_800);
    assert!((btc.price_spread_pct - 0.1).abs() < 1e-9);

    // Blocklisted kBONK/kPEPE never appear despite complete data
    assert!(!symbols.contains(&"kBONK"));
    assert!(!symbols.contains(&"kPEPE"));

    let stats = &data.stats;
    assert_eq!(stats.total_symbols, 7);
    assert_eq!(stats.common_count, 4);
    assert_eq!(stats.high_funding_count, 4);
    assert_eq!(stats.update_count, 1);
    assert_ne!(stats.last_update, "-");
}

#[tokio::test]
async fn test_limit_applies_to_ranked_view() {
    let a = MockVenueAdapter::fixed("variational", variational_snapshot());
    let b = MockVenueAdapter::fixed("backpack", backpack_snapshot());
    let store = AggregateStore::new();
    run_poll_cycle(&a, &b, &SpreadEngine::default(), &store).await;

    let top = store.read(Some(2)).await;
    let symbols: Vec<&str> = top.summary.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["PUMP", "ETH"]);
    // Stats are not affected by the limit
    assert_eq!(top.stats.total_symbols, 7);
}

#[tokio::test]
async fn test_repeated_cycles_are_deterministic() {
    let a = MockVenueAdapter::fixed("variational", variational_snapshot());
    let b = MockVenueAdapter::fixed("backpack", backpack_snapshot());
    let store = AggregateStore::new();
    let engine = SpreadEngine::default();

    run_poll_cycle(&a, &b, &engine, &store).await;
    let first = store.read(None).await.summary;
    run_poll_cycle(&a, &b, &engine, &store).await;
    let second = store.read(None).await;

    assert_eq!(first, second.summary);
    assert_eq!(second.stats.update_count, 2);
}

#[tokio::test]
async fn test_venue_a_outage_keeps_backpack_rows() {
    let a = MockVenueAdapter::fixed("variational", VenueSnapshot::failed());
    let b = MockVenueAdapter::fixed("backpack", backpack_snapshot());
    let store = AggregateStore::new();

    let report = run_poll_cycle(&a, &b, &SpreadEngine::default(), &store).await;
    assert!(!report.venue_a_ok);
    assert!(report.venue_b_ok);

    let data = store.read(None).await;
    assert_eq!(data.summary.len(), 4);
    assert!(data.summary.iter().all(|r| !r.has_venue_a_data));
    assert_eq!(data.stats.high_funding_count, 0);
}

#[tokio::test]
async fn test_backpack_outage_replaces_previous_view() {
    let a = MockVenueAdapter::fixed("variational", variational_snapshot());
    let b = MockVenueAdapter::new(
        "backpack",
        vec![backpack_snapshot(), VenueSnapshot::failed()],
    );
    let store = AggregateStore::new();
    let engine = SpreadEngine::default();

    run_poll_cycle(&a, &b, &engine, &store).await;
    assert_eq!(store.read(None).await.summary.len(), 4);

    // No incremental merge: an empty Backpack snapshot empties the view
    run_poll_cycle(&a, &b, &engine, &store).await;
    let data = store.read(None).await;
    assert!(data.summary.is_empty());
    assert_eq!(data.stats.total_symbols, 0);
    assert_eq!(data.stats.update_count, 2);
}

#[tokio::test]
async fn test_injected_symbol_table() {
    let symbols = SymbolsConfig {
        aliases: BTreeMap::from([("kBONK".to_string(), "BONK".to_string())]),
        blocklist: Vec::new(),
    };
    let engine = SpreadEngine::new(symbols.reconciler(), RecommendationThresholds::default());
    let a = MockVenueAdapter::fixed("variational", variational_snapshot());
    let b = MockVenueAdapter::fixed("backpack", backpack_snapshot());
    let store = AggregateStore::new();

    run_poll_cycle(&a, &b, &engine, &store).await;
    let data = store.read(None).await;
    let symbols: Vec<&str> = data.summary.iter().map(|r| r.symbol.as_str()).collect();

    assert!(symbols.contains(&"kBONK"));
    // PUMP no longer aliased to PUMPFUN
    let pump = data.summary.iter().find(|r| r.symbol == "PUMP").unwrap();
    assert_eq!(pump.canonical_symbol, "PUMP");
    assert!(!pump.has_venue_a_data);
    let kbonk = data.summary.iter().find(|r| r.symbol == "kBONK").unwrap();
    assert_eq!(kbonk.canonical_symbol, "BONK");
    assert!(kbonk.has_venue_a_data);
}

#[tokio::test]
async fn test_poll_task_runs_until_shutdown() {
    let a = Arc::new(MockVenueAdapter::fixed("variational", variational_snapshot()));
    let b = Arc::new(MockVenueAdapter::fixed("backpack", backpack_snapshot()));
    let store = Arc::new(AggregateStore::new());
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    let handle = tokio::spawn(poll_task(
        a.clone(),
        b.clone(),
        Arc::new(SpreadEngine::default()),
        store.clone(),
        Duration::from_millis(20),
        shutdown_rx,
    ));

    tokio::time::sleep(Duration::from_millis(100)).await;
    let _ = shutdown_tx.send(());
    let result = tokio::time::timeout(Duration::from_secs(1), handle).await;
    assert!(result.is_ok(), "Poll task should stop on shutdown");

    let cycles = b.fetch_count();
    assert!(cycles >= 2, "expected several cycles, got {}", cycles);
    assert!(a.fetch_count() + 1 >= cycles);
    assert!(store.stats().await.update_count >= 2);
}
