//! State name resolver — cache first, Nominatim fallback.
//!
//! Flow per state:  cache hit → done (no network, no pause)
//!                  miss → one query "<state>, India" → insert + pause
//!                  failure → warn, leave unresolved (no retry this run)

use super::cache::StateCache;
use super::providers::{Geocoder, NominatimGeocoder};
use super::types::{Coordinate, LocationError};
use std::collections::HashSet;
use std::time::Duration;

/// Minimum interval between successful Nominatim calls.
pub const RATE_LIMIT_PAUSE: Duration = Duration::from_secs(1);

/// Outcome of one resolve pass over the dataset's states.
#[derive(Debug, Default)]
pub struct ResolveReport {
    /// States answered from the cache (pre-seeded or earlier this run).
    pub cache_hits: usize,
    /// States fetched from the geocoder this run.
    pub fetched: usize,
    /// States left unresolved, with the failure reason.
    pub failed: Vec<(String, String)>,
}

impl ResolveReport {
    pub fn resolved(&self) -> usize {
        self.cache_hits + self.fetched
    }
}

/// The state resolver: a mutable cache plus a geocoding fallback.
pub struct StateResolver<G: Geocoder> {
    cache: StateCache,
    geocoder: G,
    pause: Duration,
    offline: bool,
}

impl StateResolver<NominatimGeocoder> {
    pub fn new() -> Self {
        Self::with_parts(StateCache::with_seeds(), NominatimGeocoder::new(), RATE_LIMIT_PAUSE)
    }
}

impl Default for StateResolver<NominatimGeocoder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Geocoder> StateResolver<G> {
    /// Assemble a resolver from explicit parts (used by tests to swap
    /// in a stub geocoder and drop the pause).
    pub fn with_parts(cache: StateCache, geocoder: G, pause: Duration) -> Self {
        Self { cache, geocoder, pause, offline: false }
    }

    /// Offline mode: cache misses fail without touching the network.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    pub fn cache(&self) -> &StateCache {
        &self.cache
    }

    /// Coordinate for a state, if resolved (or pre-seeded).
    pub fn coordinate(&self, state: &str) -> Option<Coordinate> {
        self.cache.get(state)
    }

    /// Resolve every distinct state name exactly once.
    ///
    /// Duplicates in the input are answered from the cache (or skipped
    /// if the first attempt failed); a failed state is never queried
    /// twice in the same run.
    pub fn resolve_all<S: AsRef<str>>(&mut self, states: &[S]) -> ResolveReport {
        let mut report = ResolveReport::default();
        let mut attempted: HashSet<String> = HashSet::new();

        for state in states {
            let state = state.as_ref();
            if self.cache.contains(state) {
                report.cache_hits += 1;
                continue;
            }
            if !attempted.insert(state.trim().to_lowercase()) {
                continue; // already failed this run
            }

            eprintln!("Fetching coordinates for {}...", state);
            match self.fetch(state) {
                Ok(coord) => {
                    self.cache.insert(state, coord);
                    report.fetched += 1;
                    // Pause only after a call that hit the network.
                    std::thread::sleep(self.pause);
                }
                Err(LocationError::NotFound(_)) => {
                    eprintln!("Warning: could not find coordinates for {}", state);
                    report.failed.push((state.to_string(), "not found".to_string()));
                }
                Err(e) => {
                    eprintln!("Error fetching coordinates for {}: {}", state, e);
                    report.failed.push((state.to_string(), e.to_string()));
                }
            }
        }

        report
    }

    fn fetch(&self, state: &str) -> Result<Coordinate, LocationError> {
        if self.offline {
            return Err(LocationError::Offline);
        }
        self.geocoder.geocode(&format!("{}, India", state))
    }
}
