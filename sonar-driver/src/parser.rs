use crate::constants::{FIELD_DELIMITER, NO_ECHO_DISTANCE, SWEEP_END_ANGLE, SWEEP_START_ANGLE};
use crate::numeric::normalize_distance;
use sonar_data::Reading;
use std::error::Error;
use std::fmt;

/// Failure to decode one line of sonar output.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseError {
    /// The line is not exactly two numeric fields
    Malformed(String),
    /// Both fields are numeric but outside the sensor's domain
    OutOfRange(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::Malformed(line) => {
                write!(f, "Expected \"<angle>,<distance>\". Observed = {:?}.", line)
            }
            ParseError::OutOfRange(line) => {
                write!(f, "Reading is outside the sensor range. Observed = {:?}.", line)
            }
        }
    }
}

impl Error for ParseError {}

/// Parses one line of the form `<angle>,<distance>` into a [`Reading`].
///
/// The angle is in degrees and the distance in centimeters. A distance of `-1`
/// means no echo was received and is stored as `0`. Distances beyond the
/// display range are accepted as received; only
/// [`SweepView::polar_points`](crate::SweepView::polar_points) clamps them.
pub fn parse_reading(line: &str) -> Result<Reading, ParseError> {
    let line = line.trim();
    let mut fields = line.split(FIELD_DELIMITER);
    let (angle, distance) = match (fields.next(), fields.next(), fields.next()) {
        (Some(angle), Some(distance), None) => (angle, distance),
        _ => return Err(ParseError::Malformed(line.to_string())),
    };

    let angle = parse_field(angle).ok_or_else(|| ParseError::Malformed(line.to_string()))?;
    let distance = parse_field(distance).ok_or_else(|| ParseError::Malformed(line.to_string()))?;

    if !in_domain(angle, distance) {
        return Err(ParseError::OutOfRange(line.to_string()));
    }

    Ok(Reading::new(angle, normalize_distance(distance)))
}

fn parse_field(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok()
}

fn in_domain(angle: f64, distance: f64) -> bool {
    if !angle.is_finite() || !distance.is_finite() {
        return false;
    }
    let angle_ok = (SWEEP_START_ANGLE..=SWEEP_END_ANGLE).contains(&angle);
    let distance_ok = distance >= 0. || distance == NO_ECHO_DISTANCE;
    angle_ok && distance_ok
}
