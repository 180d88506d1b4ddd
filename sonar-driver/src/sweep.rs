use crate::constants::{DEFAULT_MAX_RANGE, SWEEP_END_ANGLE, SWEEP_START_ANGLE};
use crate::numeric::{clamp_distance, degree_to_radian};
use log::debug;
use sonar_data::{PolarPoint, Reading, SweepEvent};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Decides whether a reading marks the start of a new sweep.
pub type BoundaryPredicate = fn(&Reading) -> bool;

/// Start-of-sweep marker of the sensor firmware.
///
/// The sensor transmits a literal `0` or `360` when it wraps, so this compares
/// exactly. A reading a hair off either value is appended to the current sweep.
pub fn is_sweep_boundary(reading: &Reading) -> bool {
    reading.angle == SWEEP_START_ANGLE || reading.angle == SWEEP_END_ANGLE
}

#[derive(Default)]
struct Sweep {
    readings: Vec<Reading>,
    latest: Option<Reading>,
    sweep_index: u64,
}

/// Writer side of the sweep in progress.
///
/// There is exactly one `SweepBuffer` per acquisition session. Render-side
/// code reads through [`SweepView`] handles obtained from [`SweepBuffer::view`].
pub struct SweepBuffer {
    sweep: Arc<RwLock<Sweep>>,
    boundary: BoundaryPredicate,
    max_range: f64,
}

/// Read-only handle on a [`SweepBuffer`], safe to share with render threads.
#[derive(Clone)]
pub struct SweepView {
    sweep: Arc<RwLock<Sweep>>,
    max_range: f64,
}

impl SweepBuffer {
    pub fn new() -> SweepBuffer {
        SweepBuffer::with_boundary(is_sweep_boundary)
    }

    pub fn with_boundary(boundary: BoundaryPredicate) -> SweepBuffer {
        SweepBuffer {
            sweep: Arc::new(RwLock::new(Sweep::default())),
            boundary,
            max_range: DEFAULT_MAX_RANGE,
        }
    }

    /// Sets the display ceiling applied by [`SweepView::polar_points`].
    pub fn with_max_range(mut self, max_range: f64) -> SweepBuffer {
        self.max_range = max_range;
        self
    }

    pub fn view(&self) -> SweepView {
        SweepView {
            sweep: Arc::clone(&self.sweep),
            max_range: self.max_range,
        }
    }

    /// Adds a reading to the current sweep, or starts a new sweep with it.
    pub fn ingest(&mut self, reading: Reading) -> SweepEvent {
        let is_boundary = (self.boundary)(&reading);
        let mut sweep = write_lock(&self.sweep);
        sweep.latest = Some(reading);
        if is_boundary {
            sweep.readings.clear();
            sweep.readings.push(reading);
            sweep.sweep_index += 1;
            debug!("Sweep #{} started at {} degrees.", sweep.sweep_index, reading.angle);
            SweepEvent::Reset
        } else {
            sweep.readings.push(reading);
            SweepEvent::Appended
        }
    }

    pub fn snapshot(&self) -> Vec<Reading> {
        read_lock(&self.sweep).readings.clone()
    }
}

impl Default for SweepBuffer {
    fn default() -> Self {
        SweepBuffer::new()
    }
}

impl SweepView {
    /// Copy of the readings of the sweep in progress, in arrival order.
    pub fn snapshot(&self) -> Vec<Reading> {
        read_lock(&self.sweep).readings.clone()
    }

    /// The current sweep in renderer form: angles in radian, distances clamped
    /// to the display range.
    pub fn polar_points(&self) -> Vec<PolarPoint> {
        let readings = self.snapshot();
        readings
            .iter()
            .map(|r| PolarPoint {
                angle_radian: degree_to_radian(r.angle),
                distance: clamp_distance(r.distance, self.max_range),
            })
            .collect()
    }

    /// The most recently ingested reading, surviving sweep resets.
    pub fn latest(&self) -> Option<Reading> {
        read_lock(&self.sweep).latest
    }

    /// Number of sweep resets observed so far.
    pub fn sweep_index(&self) -> u64 {
        read_lock(&self.sweep).sweep_index
    }

    pub fn len(&self) -> usize {
        read_lock(&self.sweep).readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// The sweep is never left half-updated by a panicking holder, so a poisoned
// lock still guards consistent data.
fn read_lock(sweep: &RwLock<Sweep>) -> RwLockReadGuard<'_, Sweep> {
    sweep.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_lock(sweep: &RwLock<Sweep>) -> RwLockWriteGuard<'_, Sweep> {
    sweep.write().unwrap_or_else(PoisonError::into_inner)
}
