use crate::config::SearchConfig;
use crate::constants::*;
use crate::models::{Coordinates, DistanceMeters, Place, RadiusMeters};
use serde::{Deserialize, Serialize};

/// Parameters for one nearby search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub keyword: String,
    pub center: Coordinates,
    /// Stop expanding the radius once this many unique results are collected.
    /// Also caps the returned list. Fewer results is success, not an error.
    pub min_count: usize,
    pub initial_radius: RadiusMeters,
    pub max_radius: RadiusMeters,
}

impl SearchRequest {
    pub fn new(keyword: String, center: Coordinates) -> Result<Self, String> {
        let request = SearchRequest {
            keyword,
            center,
            min_count: DEFAULT_MIN_RESULT_COUNT,
            initial_radius: DistanceMeters::from_raw(DEFAULT_INITIAL_RADIUS_METERS),
            max_radius: DistanceMeters::from_raw(DEFAULT_MAX_RADIUS_METERS),
        };
        request.validate()?;
        Ok(request)
    }

    /// Build a request using the configured search knobs instead of the
    /// built-in defaults.
    pub fn from_config(
        keyword: String,
        center: Coordinates,
        config: &SearchConfig,
    ) -> Result<Self, String> {
        let request = SearchRequest {
            keyword,
            center,
            min_count: config.min_result_count,
            initial_radius: DistanceMeters::from_raw(config.initial_radius_m),
            max_radius: DistanceMeters::from_raw(config.max_radius_m),
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.keyword.trim().is_empty() {
            return Err("Search keyword must not be empty".to_string());
        }
        if self.min_count == 0 {
            return Err("Minimum result count must be greater than 0".to_string());
        }
        if !self.initial_radius.as_meters().is_finite() || self.initial_radius.as_meters() <= 0.0 {
            return Err("Initial radius must be a positive number of meters".to_string());
        }
        if !self.max_radius.as_meters().is_finite() || self.max_radius.as_meters() <= 0.0 {
            return Err("Maximum radius must be a positive number of meters".to_string());
        }
        Ok(())
    }
}

/// A place paired with its great-circle distance from the search center.
/// Result lists are ordered by ascending distance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResult {
    pub place: Place,
    pub distance: DistanceMeters,
}
