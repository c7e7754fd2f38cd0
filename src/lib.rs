//! Funding Monitor: cross-venue funding-rate spread tracker
//!
//! Polls Variational and Backpack perpetual markets and publishes a ranked
//! view of funding-rate differentials:
//! - Venue adapters (Variational, Backpack) via REST
//! - Symbol reconciliation, spread join and opportunity classification
//! - HTTP read API for dashboard clients

pub mod adapters;
pub mod config;
pub mod core;
pub mod error;
pub mod server;

pub use error::AppError;
