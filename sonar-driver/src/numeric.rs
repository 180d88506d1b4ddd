use crate::constants::NO_ECHO_DISTANCE;

pub(crate) fn degree_to_radian(degree: f64) -> f64 {
    degree * std::f64::consts::PI / 180.
}

pub(crate) fn normalize_distance(distance: f64) -> f64 {
    if distance == NO_ECHO_DISTANCE {
        0.
    } else {
        distance
    }
}

pub(crate) fn clamp_distance(distance: f64, max_range: f64) -> f64 {
    distance.min(max_range).max(0.)
}
