//! Stable application-wide constants.
//!
//! Values here are structural invariants, algorithm coefficients, and default
//! fallbacks for env-var-based configuration. They should rarely change.
//! For knobs that benefit from runtime tuning, see
//! [`SearchConfig`](crate::config::SearchConfig) instead.

// --- Nearby search defaults (used when SEARCH_* env vars are absent) ---

/// Default minimum number of results a search tries to accumulate before
/// the radius expansion loop stops. Also the cap on returned results.
pub const DEFAULT_MIN_RESULT_COUNT: usize = 20;
/// Default starting search radius in meters.
pub const DEFAULT_INITIAL_RADIUS_METERS: f64 = 1000.0;
/// Default ceiling on the search radius in meters. The loop gives up once
/// the doubled radius passes this, returning whatever was accumulated.
pub const DEFAULT_MAX_RADIUS_METERS: f64 = 50_000.0;

// --- Search loop structural limits ---

/// Hard floor on the starting radius. Requests below this are raised to it,
/// keeping the first provider query wide enough to be useful.
pub const MIN_SEARCH_RADIUS_METERS: f64 = 200.0;
/// Growth factor applied to the radius after each provider round-trip.
/// Doubling bounds the number of round-trips to O(log(max/initial)).
pub const RADIUS_GROWTH_FACTOR: f64 = 2.0;
/// Scale used when rounding coordinates for the dedup key: 10^4 keeps four
/// decimal places, roughly 11 m of latitude. Two hits with the same name
/// inside that cell are treated as the same physical place.
pub const DEDUP_COORDINATE_SCALE: f64 = 10_000.0;

// --- Places text-search provider ---

/// Per-request timeout for the places HTTP endpoint.
pub const PLACES_QUERY_TIMEOUT_SECONDS: u64 = 10;
/// Retry attempts after the first failure (2 = 3 total attempts).
pub const PLACES_RETRY_MAX_ATTEMPTS: usize = 2;
/// Service-side ceiling on the location-bias circle radius in meters.
pub const PLACES_MAX_BIAS_RADIUS_METERS: f64 = 50_000.0;
/// Maximum results a single text-search page can return.
pub const PLACES_MAX_RESULT_COUNT_PER_QUERY: u32 = 20;

// --- Map indicator ---

/// Suggested animation duration for the rendering surface when rotating the
/// user-direction indicator between successive heading samples. Short enough
/// to track the compass, long enough to avoid visible snapping.
pub const INDICATOR_ROTATION_ANIMATION_MS: u64 = 100;
