//! Cross-venue spread engine
//!
//! Joins the Variational (A) and Backpack (B) snapshots into ranked
//! comparison records. Backpack defines the instrument universe: every
//! record starts from a Backpack quote and looks up its Variational
//! counterpart through the [`SymbolReconciler`].
//!
//! # Missing data
//! Variational values default to 0 when the canonical symbol is not
//! listed, and `has_venue_a_data` flags whether the counterpart carried
//! both a price and a non-zero funding rate.

use serde::Serialize;

use crate::adapters::types::VenueSnapshot;
use crate::core::recommendation::{classify_with, Recommendation, RecommendationThresholds};
use crate::core::symbols::SymbolReconciler;

/// `|funding|` above which a Variational instrument counts as high-funding
pub const HIGH_FUNDING_THRESHOLD: f64 = 0.01;

// =============================================================================
// Core Types
// =============================================================================

/// One joined instrument, recomputed every cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRecord {
    /// Backpack spelling
    pub symbol: String,
    /// Variational spelling
    pub canonical_symbol: String,
    pub venue_a_funding: f64,
    pub venue_a_interval: u64,
    pub venue_a_price: f64,
    pub venue_b_funding: f64,
    pub venue_b_interval: u64,
    pub venue_b_price: f64,
    /// (B − A) / A × 100, 0 when either price is missing
    pub price_spread_pct: f64,
    /// A − B, percent per hour
    pub funding_diff: f64,
    pub recommendation: Recommendation,
    pub has_venue_a_data: bool,
}

/// Instrument counts derived from one pair of snapshots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SymbolCounts {
    /// Backpack instruments carrying a funding rate
    pub total_symbols: usize,
    /// Of those, priced on Backpack and not blocklisted
    pub common_count: usize,
    /// Variational instruments with `|funding| > 0.01`
    pub high_funding_count: usize,
}

// =============================================================================
// SpreadEngine
// =============================================================================

/// Stateless join/rank over two venue snapshots
#[derive(Debug, Clone, Default)]
pub struct SpreadEngine {
    reconciler: SymbolReconciler,
    thresholds: RecommendationThresholds,
}

impl SpreadEngine {
    pub fn new(reconciler: SymbolReconciler, thresholds: RecommendationThresholds) -> Self {
        Self {
            reconciler,
            thresholds,
        }
    }

    /// Join and rank by `|funding_diff|` descending.
    ///
    /// Ties keep Backpack symbol order. `Some(n)` with `n > 0` keeps the top
    /// `n`; `None` or `Some(0)` keeps everything.
    pub fn join(
        &self,
        venue_a: &VenueSnapshot,
        venue_b: &VenueSnapshot,
        limit: Option<usize>,
    ) -> Vec<ComparisonRecord> {
        let mut records: Vec<ComparisonRecord> = venue_b
            .quotes
            .values()
            .filter_map(|b| {
                let b_price = b.price_or_zero();
                let b_funding = b.funding_or_zero();
                if b_price <= 0.0 || b_funding == 0.0 {
                    return None;
                }
                if self.reconciler.is_blocked(&b.symbol) {
                    return None;
                }

                let canonical = self.reconciler.canonical(&b.symbol);
                let a = venue_a.get(canonical);
                let a_price = a.map_or(0.0, |q| q.price_or_zero());
                let a_funding = a.map_or(0.0, |q| q.funding_or_zero());
                let a_interval = a.map_or(0, |q| q.settlement_interval_secs);

                let funding_diff = a_funding - b_funding;
                Some(ComparisonRecord {
                    symbol: b.symbol.clone(),
                    canonical_symbol: canonical.to_string(),
                    venue_a_funding: a_funding,
                    venue_a_interval: a_interval,
                    venue_a_price: a_price,
                    venue_b_funding: b_funding,
                    venue_b_interval: b.settlement_interval_secs,
                    venue_b_price: b_price,
                    price_spread_pct: price_spread_pct(a_price, b_price),
                    funding_diff,
                    recommendation: classify_with(funding_diff, &self.thresholds),
                    has_venue_a_data: a_price > 0.0 && a_funding != 0.0,
                })
            })
            .collect();

        // sort_by is stable
        records.sort_by(|x, y| y.funding_diff.abs().total_cmp(&x.funding_diff.abs()));

        if let Some(n) = limit.filter(|n| *n > 0) {
            records.truncate(n);
        }
        records
    }

    /// Instrument counts reported alongside the joined view.
    pub fn counts(&self, venue_a: &VenueSnapshot, venue_b: &VenueSnapshot) -> SymbolCounts {
        let with_funding = venue_b
            .quotes
            .values()
            .filter(|q| q.funding_rate_per_hour.is_some());

        let mut counts = SymbolCounts::default();
        for quote in with_funding {
            counts.total_symbols += 1;
            if quote.price_or_zero() > 0.0 && !self.reconciler.is_blocked(&quote.symbol) {
                counts.common_count += 1;
            }
        }
        counts.high_funding_count = venue_a
            .quotes
            .values()
            .filter(|q| q.funding_or_zero().abs() > HIGH_FUNDING_THRESHOLD)
            .count();
        counts
    }
}

/// (B − A) / A × 100 when both prices are positive, else 0.
#[inline]
pub fn price_spread_pct(a_price: f64, b_price: f64) -> f64 {
    if a_price > 0.0 && b_price > 0.0 {
        (b_price - a_price) / a_price * 100.0
    } else {
        0.0
    }
}
