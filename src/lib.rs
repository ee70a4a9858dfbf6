//! Krishi Atlas — renders an Indian agricultural dataset as an
//! interactive Leaflet map, one marker per data row, grouped into
//! toggle-able layers per crop.
//!
//! Pipeline: CSV dataset → state-name geocoding (seeded cache +
//! Nominatim fallback) → HTML map.

pub mod dataset;
pub mod location;
pub mod map;
