//! In-memory state coordinate cache.
//!
//! A single mutable map pre-seeded with a fixed set of states at
//! construction; grows monotonically as the resolver fills it in.
//! Case-insensitive keys. Not persisted across runs.

use super::types::Coordinate;
use std::collections::HashMap;

/// States whose coordinates ship with the binary, so the common cases
/// never touch the network.
pub const SEEDED_STATES: [(&str, f64, f64); 3] = [
    ("Karnataka", 15.3173, 75.7139),
    ("Kerala", 10.8505, 76.2711),
    ("Punjab", 31.1471, 75.3412),
];

/// The state → coordinate cache.
pub struct StateCache {
    entries: HashMap<String, Coordinate>,
}

impl StateCache {
    /// Create a cache pre-seeded with [`SEEDED_STATES`].
    pub fn with_seeds() -> Self {
        let mut cache = Self::empty();
        for (state, lat, lon) in SEEDED_STATES {
            cache.insert(state, Coordinate::new(lat, lon));
        }
        cache
    }

    /// Create an empty cache (for testing).
    pub fn empty() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Look up a state. Case-insensitive.
    pub fn get(&self, state: &str) -> Option<Coordinate> {
        self.entries.get(&Self::key(state)).copied()
    }

    pub fn contains(&self, state: &str) -> bool {
        self.entries.contains_key(&Self::key(state))
    }

    /// Store a resolved coordinate under a state name.
    pub fn insert(&mut self, state: &str, coord: Coordinate) {
        self.entries.insert(Self::key(state), coord);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key(state: &str) -> String {
        state.trim().to_lowercase()
    }
}

impl Default for StateCache {
    fn default() -> Self {
        Self::with_seeds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_states_present() {
        let cache = StateCache::with_seeds();
        assert_eq!(cache.len(), 3);

        let karnataka = cache.get("Karnataka").unwrap();
        assert!((karnataka.lat - 15.3173).abs() < 1e-9);
        assert!((karnataka.lon - 75.7139).abs() < 1e-9);
        assert!(cache.contains("Kerala"));
        assert!(cache.contains("Punjab"));
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let cache = StateCache::with_seeds();
        assert!(cache.contains("KARNATAKA"));
        assert!(cache.contains("karnataka"));
        assert!(cache.contains("  Karnataka "));
    }

    #[test]
    fn test_insert_and_get() {
        let mut cache = StateCache::empty();
        assert!(cache.is_empty());
        assert!(cache.get("Goa").is_none());

        cache.insert("Goa", Coordinate::new(15.2993, 74.1240));
        let goa = cache.get("goa").unwrap();
        assert!((goa.lat - 15.2993).abs() < 1e-9);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_insert_overwrites_same_key() {
        let mut cache = StateCache::empty();
        cache.insert("Goa", Coordinate::new(1.0, 2.0));
        cache.insert("GOA", Coordinate::new(3.0, 4.0));
        assert_eq!(cache.len(), 1);
        assert!((cache.get("Goa").unwrap().lat - 3.0).abs() < 1e-9);
    }
}
