#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One angle/distance sample reported by the sonar.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reading {
    /// Sensor heading in degrees, within [0, 360].
    pub angle: f64,
    /// Distance to an object in centimeters. Zero when no echo was detected.
    pub distance: f64,
}

impl Reading {
    /// Builds a reading from an angle in degrees and a distance in centimeters.
    pub fn new(angle: f64, distance: f64) -> Reading {
        Reading { angle, distance }
    }
}
