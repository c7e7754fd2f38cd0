//! Variational Venue Adapter
//!
//! Implements the VenueAdapter trait for Variational (venue A).
//! Funding is published as an annualized decimal rate and converted to
//! percent per hour.
//!
//! This module is organized into submodules:
//! - `config` - Endpoint and timeout settings
//! - `types` - API response types
//! - `adapter` - Main VariationalAdapter implementation

mod adapter;
mod config;
mod types;

// Re-export public items
pub use adapter::VariationalAdapter;
pub use config::VariationalConfig;
