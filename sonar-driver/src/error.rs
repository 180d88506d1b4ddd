use std::error::Error;
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum SonarError {
    SourceDisconnected(String),
    InvalidConfiguration(String),
    AcquisitionPanicked(String),
    SerialError(serialport::Error),
}

impl fmt::Display for SonarError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SonarError::SourceDisconnected(reason) => {
                write!(f, "Serial source disconnected: {}.", reason)
            }
            SonarError::InvalidConfiguration(reason) => {
                write!(f, "Invalid configuration: {}.", reason)
            }
            SonarError::AcquisitionPanicked(reason) => {
                write!(f, "Acquisition thread panicked: {}.", reason)
            }
            SonarError::SerialError(err) => Display::fmt(&err, f),
        }
    }
}

impl Error for SonarError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SonarError::SerialError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serialport::Error> for SonarError {
    fn from(err: serialport::Error) -> Self {
        SonarError::SerialError(err)
    }
}
