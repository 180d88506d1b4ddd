#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A reading as handed to a polar renderer.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolarPoint {
    /// Sensor heading in radian.
    pub angle_radian: f64,
    /// Distance in centimeters, clamped to the display range.
    pub distance: f64,
}
