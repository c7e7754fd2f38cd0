//! Venue adapter trait definition
//!
//! The VenueAdapter trait defines the common interface that both
//! venue adapters implement so the poll loop can treat them uniformly.

use async_trait::async_trait;

use crate::adapters::types::VenueSnapshot;

/// Common trait for venue adapters
///
/// # Example Implementation
///
/// ```ignore
/// use async_trait::async_trait;
///
/// struct FixedAdapter(VenueSnapshot);
///
/// #[async_trait]
/// impl VenueAdapter for FixedAdapter {
///     async fn fetch(&self) -> VenueSnapshot {
///         self.0.clone()
///     }
///     fn venue_name(&self) -> &'static str {
///         "fixed"
///     }
/// }
/// ```
#[async_trait]
pub trait VenueAdapter: Send + Sync {
    /// Fetch a fresh, normalized snapshot of every instrument on the venue.
    ///
    /// Never fails: transport errors, bad statuses and malformed bodies are
    /// logged and reported as `VenueSnapshot::failed()`.
    async fn fetch(&self) -> VenueSnapshot;

    /// Get the venue name for logging
    fn venue_name(&self) -> &'static str;
}
