use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Distance in kilometers
/// Prevents mixing up units and provides type safety
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct DistanceKm(pub f64);

impl DistanceKm {
    pub fn new(km: f64) -> Result<Self, String> {
        if km < 0.0 {
            return Err("Distance cannot be negative".to_string());
        }
        if !km.is_finite() {
            return Err("Distance must be a finite number".to_string());
        }
        Ok(DistanceKm(km))
    }

    /// Convert to meters
    pub fn to_meters(self) -> DistanceMeters {
        DistanceMeters(self.0 * 1000.0)
    }

    /// Get the raw kilometers value
    pub fn as_km(self) -> f64 {
        self.0
    }

    /// Create from raw value without validation (use carefully)
    pub fn from_raw(km: f64) -> Self {
        DistanceKm(km)
    }
}

impl fmt::Display for DistanceKm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}km", self.0)
    }
}

impl From<DistanceMeters> for DistanceKm {
    fn from(meters: DistanceMeters) -> Self {
        DistanceKm(meters.0 / 1000.0)
    }
}

/// Distance in meters
/// Used for search radii and ranked result distances
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct DistanceMeters(pub f64);

impl DistanceMeters {
    pub fn new(meters: f64) -> Result<Self, String> {
        if meters < 0.0 {
            return Err("Distance cannot be negative".to_string());
        }
        if !meters.is_finite() {
            return Err("Distance must be a finite number".to_string());
        }
        Ok(DistanceMeters(meters))
    }

    /// Convert to kilometers
    pub fn to_km(self) -> DistanceKm {
        DistanceKm(self.0 / 1000.0)
    }

    /// Get the raw meters value
    pub fn as_meters(self) -> f64 {
        self.0
    }

    /// Create from raw value without validation (use carefully)
    pub fn from_raw(meters: f64) -> Self {
        DistanceMeters(meters)
    }
}

impl fmt::Display for DistanceMeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}m", self.0)
    }
}

impl From<DistanceKm> for DistanceMeters {
    fn from(km: DistanceKm) -> Self {
        DistanceMeters(km.0 * 1000.0)
    }
}

impl Add for DistanceMeters {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        DistanceMeters(self.0 + other.0)
    }
}

impl Sub for DistanceMeters {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        DistanceMeters(self.0 - other.0)
    }
}

impl Mul<f64> for DistanceMeters {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        DistanceMeters(self.0 * scalar)
    }
}

/// Radius in meters - semantically similar to DistanceMeters but clearer intent
pub type RadiusMeters = DistanceMeters;
