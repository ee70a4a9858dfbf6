//! State-name → coordinate resolution.
//!
//! A pre-seeded in-memory cache backed by OpenStreetMap Nominatim,
//! with a fixed pause between network calls.

pub mod cache;
pub mod providers;
pub mod resolver;
pub mod types;

pub use cache::{StateCache, SEEDED_STATES};
pub use providers::{Geocoder, NominatimGeocoder};
pub use resolver::{ResolveReport, StateResolver, RATE_LIMIT_PAUSE};
pub use types::{Coordinate, LocationError};
