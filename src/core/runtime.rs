//! Poll loop
//!
//! One background task fetches Backpack, then Variational, joins the
//! snapshots and publishes the result. Cycles never overlap: the next one
//! starts `interval` after the previous one finished.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::adapters::traits::VenueAdapter;
use crate::core::spread::SpreadEngine;
use crate::core::store::AggregateStore;

/// Outcome of one poll cycle, for logging and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub venue_a_ok: bool,
    pub venue_b_ok: bool,
    pub venue_a_quotes: usize,
    pub venue_b_quotes: usize,
    pub venue_b_funding: usize,
    pub records: usize,
    pub update_count: u64,
    pub elapsed_ms: u64,
}

/// Run one complete cycle and publish into `store`.
///
/// Venue failures arrive as empty snapshots; the cycle still publishes
/// (possibly empty) results and bumps `update_count`.
pub async fn run_poll_cycle(
    venue_a: &dyn VenueAdapter,
    venue_b: &dyn VenueAdapter,
    engine: &SpreadEngine,
    store: &AggregateStore,
) -> CycleReport {
    let started = Instant::now();

    let snapshot_b = venue_b.fetch().await;
    let snapshot_a = venue_a.fetch().await;

    let records = engine.join(&snapshot_a, &snapshot_b, None);
    let counts = engine.counts(&snapshot_a, &snapshot_b);
    let record_count = records.len();
    let update_count = store.replace(records, counts).await;

    let report = CycleReport {
        venue_a_ok: snapshot_a.success,
        venue_b_ok: snapshot_b.success,
        venue_a_quotes: snapshot_a.len(),
        venue_b_quotes: snapshot_b.len(),
        venue_b_funding: snapshot_b.funding_count(),
        records: record_count,
        update_count,
        elapsed_ms: started.elapsed().as_millis() as u64,
    };

    if report.venue_a_ok && report.venue_b_ok {
        info!(
            update = report.update_count,
            variational = report.venue_a_quotes,
            backpack = report.venue_b_quotes,
            backpack_funding = report.venue_b_funding,
            records = report.records,
            elapsed_ms = report.elapsed_ms,
            "Poll cycle complete"
        );
    } else {
        warn!(
            update = report.update_count,
            variational_ok = report.venue_a_ok,
            backpack_ok = report.venue_b_ok,
            records = report.records,
            elapsed_ms = report.elapsed_ms,
            "Poll cycle complete with venue failures"
        );
    }

    report
}

/// Poll forever until a shutdown signal arrives.
///
/// # Arguments
/// * `venue_a` - Variational adapter
/// * `venue_b` - Backpack adapter
/// * `engine` - Join/classify engine
/// * `store` - Destination for published views
/// * `interval` - Sleep between cycles
/// * `shutdown_rx` - Broadcast receiver for shutdown signal
pub async fn poll_task(
    venue_a: Arc<dyn VenueAdapter>,
    venue_b: Arc<dyn VenueAdapter>,
    engine: Arc<SpreadEngine>,
    store: Arc<AggregateStore>,
    interval: Duration,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    info!(
        interval_secs = interval.as_secs(),
        venue_a = venue_a.venue_name(),
        venue_b = venue_b.venue_name(),
        "Poll task started"
    );

    let mut cycles: u64 = 0;
    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,
            _ = run_poll_cycle(venue_a.as_ref(), venue_b.as_ref(), &engine, &store) => {
                cycles += 1;
            }
        }

        tokio::select! {
            _ = shutdown_rx.recv() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    info!(cycles, "Poll task stopped");
}
