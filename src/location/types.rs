//! Core types for the location subsystem.

use std::fmt;

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.4}, {:.4}]", self.lat, self.lon)
    }
}

/// Location resolution errors. All of these are recovered locally by
/// the resolver: the state is logged and left unresolved.
#[derive(Debug)]
pub enum LocationError {
    Network(String),
    NotFound(String),
    InvalidResponse(String),
    /// Offline mode: network lookups are disabled.
    Offline,
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::NotFound(q) => write!(f, "Location not found: '{}'", q),
            Self::InvalidResponse(msg) => write!(f, "Invalid API response: {}", msg),
            Self::Offline => write!(f, "Offline mode: network lookups disabled"),
        }
    }
}

impl std::error::Error for LocationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_display() {
        let c = Coordinate::new(15.3173, 75.7139);
        assert_eq!(c.to_string(), "[15.3173, 75.7139]");
    }

    #[test]
    fn test_error_display() {
        let e = LocationError::NotFound("Goa, India".into());
        assert!(e.to_string().contains("Goa, India"));
    }
}
