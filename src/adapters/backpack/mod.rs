//! Backpack Venue Adapter
//!
//! Implements the VenueAdapter trait for Backpack (venue B).
//! Market metadata and tickers come from two bulk endpoints; funding needs
//! one call per perpetual, issued through a bounded worker pool. All
//! traffic goes through the configured forward proxy.
//!
//! This module is organized into submodules:
//! - `config` - Endpoint, proxy and fan-out settings
//! - `types` - API response types and symbol helpers
//! - `adapter` - Main BackpackAdapter implementation

mod adapter;
mod config;
mod types;

// Re-export public items
pub use adapter::BackpackAdapter;
pub use config::BackpackConfig;
pub use types::perp_base;
