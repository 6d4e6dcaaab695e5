use crate::constants::*;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub places_api_key: String,
    /// Override for the places endpoint base URL. Used by tests and
    /// self-hosted proxies; the public endpoint is used when absent.
    pub places_base_url: Option<String>,
    pub search: SearchConfig,
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Minimum number of unique results to accumulate before the radius
    /// expansion loop stops. Also caps the returned list.
    pub min_result_count: usize,

    /// Starting search radius in meters. Raised to the structural floor
    /// at search time if configured below it.
    pub initial_radius_m: f64,

    /// Radius ceiling in meters. The loop gives up past this and returns
    /// whatever was accumulated.
    pub max_radius_m: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_result_count: DEFAULT_MIN_RESULT_COUNT,
            initial_radius_m: DEFAULT_INITIAL_RADIUS_METERS,
            max_radius_m: DEFAULT_MAX_RADIUS_METERS,
        }
    }
}

impl SearchConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let config = Self {
            min_result_count: env::var("SEARCH_MIN_RESULT_COUNT")
                .unwrap_or_else(|_| defaults.min_result_count.to_string())
                .parse()
                .map_err(|_| "Invalid SEARCH_MIN_RESULT_COUNT")?,

            initial_radius_m: env::var("SEARCH_INITIAL_RADIUS_M")
                .unwrap_or_else(|_| defaults.initial_radius_m.to_string())
                .parse()
                .map_err(|_| "Invalid SEARCH_INITIAL_RADIUS_M")?,

            max_radius_m: env::var("SEARCH_MAX_RADIUS_M")
                .unwrap_or_else(|_| defaults.max_radius_m.to_string())
                .parse()
                .map_err(|_| "Invalid SEARCH_MAX_RADIUS_M")?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.min_result_count == 0 {
            return Err("SEARCH_MIN_RESULT_COUNT must be greater than 0".to_string());
        }
        if !self.initial_radius_m.is_finite() || self.initial_radius_m <= 0.0 {
            return Err("SEARCH_INITIAL_RADIUS_M must be a positive number".to_string());
        }
        if !self.max_radius_m.is_finite() || self.max_radius_m < self.initial_radius_m {
            return Err(
                "SEARCH_MAX_RADIUS_M must be a number >= SEARCH_INITIAL_RADIUS_M".to_string(),
            );
        }
        Ok(())
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        Ok(Config {
            places_api_key: env::var("PLACES_API_KEY").map_err(|_| "PLACES_API_KEY must be set")?,
            places_base_url: env::var("PLACES_BASE_URL").ok(),
            search: SearchConfig::from_env()?,
        })
    }
}
