use serde::{Deserialize, Serialize};

/// Device true-compass heading in degrees, normalized to [0, 360).
/// Produced continuously by the heading sensor; only the latest sample
/// matters, nothing is accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadingSample {
    pub true_heading: f64,
}

impl HeadingSample {
    pub fn new(degrees: f64) -> Self {
        HeadingSample {
            true_heading: degrees.rem_euclid(360.0),
        }
    }
}

/// Current rotation of the map view itself in degrees, normalized to
/// [0, 360). Independent of device heading; supplied by the rendering
/// surface on every rotation-change event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapOrientation(f64);

impl MapOrientation {
    pub fn new(degrees: f64) -> Self {
        MapOrientation(degrees.rem_euclid(360.0))
    }

    pub fn as_degrees(self) -> f64 {
        self.0
    }
}
