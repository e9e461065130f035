use crate::ErrorKind;

/// Errors raised by device operations. The device is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceError {
    #[error("Battery percentage must be between 0 and 100, got {0}")]
    BatteryOutOfRange(i32),

    #[error("Invalid IP address '{0}': expected four dot-separated groups of 1-3 digits")]
    InvalidIpAddress(String),

    #[error("{name} cannot turn on: battery too low ({battery}%)")]
    BatteryTooLow { name: String, battery: u8 },

    #[error("{name} cannot turn on: empty system, no operating system installed")]
    EmptySystem { name: String },

    #[error("{name} cannot connect: network '{network}' is not an MD Ltd. network")]
    Connection { name: String, network: String },
}

impl DeviceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DeviceError::BatteryOutOfRange(_) | DeviceError::InvalidIpAddress(_) => {
                ErrorKind::Validation
            }
            DeviceError::BatteryTooLow { .. } | DeviceError::EmptySystem { .. } => {
                ErrorKind::Precondition
            }
            DeviceError::Connection { .. } => ErrorKind::Connection,
        }
    }
}
