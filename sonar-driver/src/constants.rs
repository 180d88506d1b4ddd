pub(crate) const DEFAULT_BAUD_RATE: u32 = 115200;
pub(crate) const DEFAULT_READ_TIMEOUT_MS: u64 = 100;
// Display ceiling of the reference deployment, in centimeters
pub(crate) const DEFAULT_MAX_RANGE: f64 = 50.;
pub(crate) const FIELD_DELIMITER: char = ',';
pub(crate) const LINE_TERMINATOR: u8 = b'\n';
pub(crate) const MAX_LINE_BYTES: usize = 256;
pub(crate) const READ_CHUNK_SIZE: usize = 64;
pub(crate) const NO_ECHO_DISTANCE: f64 = -1.;
pub(crate) const SWEEP_START_ANGLE: f64 = 0.;
pub(crate) const SWEEP_END_ANGLE: f64 = 360.;
