//! Venue adapters
//!
//! Each venue lives in its own module and implements [`VenueAdapter`],
//! producing a normalized [`VenueSnapshot`] per poll cycle.

pub mod backpack;
pub mod errors;
pub mod traits;
pub mod types;
pub mod variational;

pub use backpack::{BackpackAdapter, BackpackConfig};
pub use errors::{ExchangeError, ExchangeResult};
pub use traits::VenueAdapter;
pub use types::{InstrumentQuote, VenueSnapshot};
pub use variational::{VariationalAdapter, VariationalConfig};
