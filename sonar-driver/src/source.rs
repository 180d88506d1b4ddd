use crate::config::SonarConfig;
use crate::constants::READ_CHUNK_SIZE;
use crate::error::SonarError;
use crate::framing::LineFramer;
use serialport::SerialPort;
use std::io::{ErrorKind, Read};

/// A lazy, non-restartable stream of text lines from the sensor.
pub trait LineSource {
    /// Waits for the next line for at most one read timeout.
    ///
    /// `Ok(None)` means the timeout elapsed without a complete line.
    /// [`SonarError::SourceDisconnected`] ends the session.
    fn next_line(&mut self) -> Result<Option<String>, SonarError>;
}

/// Frames lines out of any byte reader, typically a serial port.
pub struct ByteLineSource<R: Read> {
    reader: R,
    framer: LineFramer,
}

impl<R: Read> ByteLineSource<R> {
    pub fn new(reader: R) -> ByteLineSource<R> {
        ByteLineSource {
            reader,
            framer: LineFramer::new(),
        }
    }
}

impl<R: Read> LineSource for ByteLineSource<R> {
    fn next_line(&mut self) -> Result<Option<String>, SonarError> {
        if let Some(line) = self.framer.next_line() {
            return Ok(Some(line));
        }

        let mut chunk = [0u8; READ_CHUNK_SIZE];
        match self.reader.read(&mut chunk) {
            Ok(0) => Err(SonarError::SourceDisconnected(
                "end of stream".to_string(),
            )),
            Ok(n_read) => {
                self.framer.extend(&chunk[..n_read]);
                Ok(self.framer.next_line())
            }
            Err(e) if is_retryable(e.kind()) => Ok(None),
            Err(e) => Err(SonarError::SourceDisconnected(e.to_string())),
        }
    }
}

fn is_retryable(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted
    )
}

/// Opens the serial port described by `config`.
pub fn open_port(config: &SonarConfig) -> Result<Box<dyn SerialPort>, SonarError> {
    config.validate()?;
    serialport::new(config.port_name.as_str(), config.baud_rate)
        .timeout(config.read_timeout)
        .open()
        .map_err(|e| {
            SonarError::InvalidConfiguration(format!(
                "failed to open \"{}\": {}",
                config.port_name, e
            ))
        })
}

/// Device paths of the serial ports present on this machine.
pub fn available_ports() -> Result<Vec<String>, SonarError> {
    let ports = serialport::available_ports()?;
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}
