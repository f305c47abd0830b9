//! Transport error types

use core::fmt;

use crate::platform::error::I2cError;

/// Errors surfaced by the shared I2C transport.
///
/// The transport never retries internally; every failure is returned with
/// enough detail for the caller to decide. `Timeout` and `Transfer` are the
/// retryable ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Empty buffer or otherwise unusable argument; caller bug, not retryable
    InvalidArgument,
    /// Port claim or hardware transfer exceeded its deadline; retryable
    Timeout,
    /// Controller behind the port is not powered or not responsive
    DeviceNotReady,
    /// Hardware rejected the requested bus configuration
    Configuration(I2cError),
    /// Bus-level failure during data exchange; no partial data is valid
    Transfer(I2cError),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::InvalidArgument => write!(f, "invalid argument"),
            TransportError::Timeout => write!(f, "port claim or transfer timed out"),
            TransportError::DeviceNotReady => write!(f, "I2C controller not ready"),
            TransportError::Configuration(e) => write!(f, "bus configuration rejected: {:?}", e),
            TransportError::Transfer(e) => write!(f, "bus transfer failed: {:?}", e),
        }
    }
}

impl embedded_hal::i2c::Error for TransportError {
    fn kind(&self) -> embedded_hal::i2c::ErrorKind {
        use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
        match self {
            TransportError::Transfer(I2cError::Nack) => {
                ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown)
            }
            TransportError::Transfer(I2cError::ArbitrationLost) => ErrorKind::ArbitrationLoss,
            TransportError::Transfer(I2cError::BusError) => ErrorKind::Bus,
            _ => ErrorKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{Error, ErrorKind};

    #[test]
    fn display_keeps_bus_error_detail() {
        let err = TransportError::Transfer(I2cError::Nack);
        assert_eq!(format!("{}", err), "bus transfer failed: Nack");
    }

    #[test]
    fn hal_error_kind_maps_bus_failures() {
        assert_eq!(
            TransportError::Transfer(I2cError::ArbitrationLost).kind(),
            ErrorKind::ArbitrationLoss
        );
        assert_eq!(
            TransportError::Transfer(I2cError::BusError).kind(),
            ErrorKind::Bus
        );
        assert_eq!(TransportError::Timeout.kind(), ErrorKind::Other);
        assert!(matches!(
            TransportError::Transfer(I2cError::Nack).kind(),
            ErrorKind::NoAcknowledge(_)
        ));
    }
}
