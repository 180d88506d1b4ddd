mod config;
mod constants;
mod driver_threads;
mod error;
mod framing;
mod numeric;
mod parser;
mod source;
mod sweep;

use crate::driver_threads::spawn;
use crossbeam_channel::bounded;
use log::info;

pub use crate::config::SonarConfig;
pub use crate::driver_threads::{join, AcquisitionThread};
pub use crate::error::SonarError;
pub use crate::parser::{parse_reading, ParseError};
pub use crate::source::{available_ports, open_port, ByteLineSource, LineSource};
pub use crate::sweep::{is_sweep_boundary, BoundaryPredicate, SweepBuffer, SweepView};
pub use sonar_data::{PolarPoint, Reading, SweepEvent};

/// Function to launch sonar acquisition on a serial port.
/// # Arguments
///
/// * `config` - Port name, link settings and display range.
///
/// Acquisition never starts when the configuration is invalid or the port
/// cannot be opened.
pub fn run_driver(config: &SonarConfig) -> Result<(AcquisitionThread, SweepView), SonarError> {
    let port = open_port(config)?;
    info!(
        "Opened \"{}\" at {} baud.",
        config.port_name, config.baud_rate
    );
    Ok(run_with_source(ByteLineSource::new(port), config.max_range))
}

/// Function to launch acquisition on any line source.
/// # Arguments
///
/// * `source` - Source of raw text lines, moved into the acquisition thread.
/// * `max_range` - Display ceiling in centimeters applied to polar points.
pub fn run_with_source<S>(source: S, max_range: f64) -> (AcquisitionThread, SweepView)
where
    S: LineSource + Send + 'static,
{
    let buffer = SweepBuffer::new().with_max_range(max_range);
    let view = buffer.view();

    let (terminator_tx, terminator_rx) = bounded(10);
    let thread = Some(spawn(source, buffer, terminator_rx));

    let acquisition = AcquisitionThread {
        terminator_tx,
        thread,
    };

    (acquisition, view)
}
