//! Core module - symbol reconciliation, classification, join, store, poll loop
//!
//! This module uses **explicit re-exports** instead of glob exports (`pub use module::*`)
//! to provide better API visibility and prevent accidental public API changes.
//!
//! ## Usage
//! Prefer importing from `crate::core`:
//! ```ignore
//! use crate::core::{AggregateStore, SpreadEngine, SymbolReconciler};
//! ```

pub mod recommendation;
pub mod runtime;
pub mod spread;
pub mod store;
pub mod symbols;

// Explicit re-exports for symbols module
pub use symbols::{SymbolReconciler, DEFAULT_ALIASES, DEFAULT_BLOCKLIST};

// Explicit re-exports for recommendation module
pub use recommendation::{
    classify, classify_with, Direction, Recommendation, RecommendationThresholds, Tier,
};

// Explicit re-exports for spread module
pub use spread::{ComparisonRecord, SpreadEngine, SymbolCounts, HIGH_FUNDING_THRESHOLD};

// Explicit re-exports for store module
pub use store::{AggregateStore, DataResponse, StoreStats, NEVER_UPDATED};

// Explicit re-exports for runtime module
pub use runtime::{poll_task, run_poll_cycle, CycleReport};
