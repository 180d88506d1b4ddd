#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of feeding one reading into the sweep in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SweepEvent {
    /// The reading continued the current sweep
    Appended,
    /// The reading started a new sweep and the previous one was discarded
    Reset,
}
