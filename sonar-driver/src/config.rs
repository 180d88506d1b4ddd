use crate::constants::{DEFAULT_BAUD_RATE, DEFAULT_MAX_RANGE, DEFAULT_READ_TIMEOUT_MS};
use crate::error::SonarError;
use std::time::Duration;

/// Connection and display settings of one acquisition session.
#[derive(Clone, Debug, PartialEq)]
pub struct SonarConfig {
    /// Serial port name such as `/dev/ttyUSB0`.
    pub port_name: String,
    pub baud_rate: u32,
    /// Upper bound on one blocking read. Stopping acquisition is observed
    /// within this interval.
    pub read_timeout: Duration,
    /// Display ceiling in centimeters.
    pub max_range: f64,
}

impl SonarConfig {
    pub fn new(port_name: &str) -> SonarConfig {
        SonarConfig {
            port_name: port_name.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout: Duration::from_millis(DEFAULT_READ_TIMEOUT_MS),
            max_range: DEFAULT_MAX_RANGE,
        }
    }

    pub fn with_baud_rate(mut self, baud_rate: u32) -> SonarConfig {
        self.baud_rate = baud_rate;
        self
    }

    pub fn with_read_timeout(mut self, read_timeout: Duration) -> SonarConfig {
        self.read_timeout = read_timeout;
        self
    }

    pub fn with_max_range(mut self, max_range: f64) -> SonarConfig {
        self.max_range = max_range;
        self
    }

    pub fn validate(&self) -> Result<(), SonarError> {
        if self.port_name.trim().is_empty() {
            return Err(SonarError::InvalidConfiguration(
                "no serial port selected".to_string(),
            ));
        }
        if self.baud_rate == 0 {
            return Err(SonarError::InvalidConfiguration(
                "baud rate must be positive".to_string(),
            ));
        }
        if self.read_timeout.is_zero() {
            return Err(SonarError::InvalidConfiguration(
                "read timeout must be positive".to_string(),
            ));
        }
        if !self.max_range.is_finite() || self.max_range <= 0. {
            return Err(SonarError::InvalidConfiguration(format!(
                "max range must be a positive distance, got {}",
                self.max_range
            )));
        }
        Ok(())
    }
}
