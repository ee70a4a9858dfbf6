//! Geocoding providers.
//!
//! The [`Geocoder`] trait is the seam between the resolver and the
//! network; [`NominatimGeocoder`] is the production implementation.

use super::types::{Coordinate, LocationError};
use serde::Deserialize;
use std::time::Duration;

/// User-Agent sent to Nominatim, per their usage policy.
pub const USER_AGENT: &str = "crop_geocoder";

/// Per-request network timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A blocking place-name → coordinate lookup.
pub trait Geocoder {
    fn geocode(&self, query: &str) -> Result<Coordinate, LocationError>;
}

#[derive(Deserialize, Debug, Clone)]
struct NominatimResult {
    lat: String,
    lon: String,
}

/// Geocoder backed by OpenStreetMap Nominatim.
pub struct NominatimGeocoder {
    timeout: Duration,
}

impl NominatimGeocoder {
    pub fn new() -> Self {
        Self { timeout: REQUEST_TIMEOUT }
    }
}

impl Default for NominatimGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, query: &str) -> Result<Coordinate, LocationError> {
        let url = format!(
            "https://nominatim.openstreetmap.org/search?q={}&format=json&limit=1",
            urlencode(query),
        );

        let response = ureq::get(&url)
            .set("User-Agent", USER_AGENT)
            .timeout(self.timeout)
            .call()
            .map_err(|e| LocationError::Network(e.to_string()))?;

        let results: Vec<NominatimResult> = response
            .into_json()
            .map_err(|e| LocationError::InvalidResponse(e.to_string()))?;

        let top = results
            .first()
            .ok_or_else(|| LocationError::NotFound(query.to_string()))?;

        let lat: f64 = top
            .lat
            .parse()
            .map_err(|_| LocationError::InvalidResponse(format!("bad latitude '{}'", top.lat)))?;
        let lon: f64 = top
            .lon
            .parse()
            .map_err(|_| LocationError::InvalidResponse(format!("bad longitude '{}'", top.lon)))?;

        Ok(Coordinate::new(lat, lon))
    }
}

fn urlencode(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            ' ' => "%20".to_string(),
            '&' => "%26".to_string(),
            '=' => "%3D".to_string(),
            '+' => "%2B".to_string(),
            ',' => "%2C".to_string(),
            _ if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' || c == '~' => {
                c.to_string()
            }
            _ => format!("%{:02X}", c as u32),
        })
        .collect()
}
