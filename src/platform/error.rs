//! Platform error types
//!
//! One error enum per hardware domain, folded into [`PlatformError`] at the
//! top level.

use core::fmt;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
///
/// All platform implementations map their HAL-specific errors to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlatformError {
    /// I2C operation failed
    I2c(I2cError),
    /// GPIO operation failed
    Gpio(GpioError),
    /// ADC operation failed
    Adc(AdcError),
    /// PWM operation failed
    Pwm(PwmError),
    /// Peripheral initialization failed
    InitializationFailed,
    /// Invalid configuration provided
    InvalidConfig,
}

/// I2C-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cError {
    /// Bus fault (misplaced START or STOP on the wire)
    BusError,
    /// Device did not acknowledge
    Nack,
    /// Lost arbitration to another controller
    ArbitrationLost,
    /// Transfer did not complete in time
    Timeout,
    /// Address is malformed or reserved
    InvalidAddress,
}

/// GPIO-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// Pin index out of range for the package
    InvalidPin,
    /// Operation not legal in the pin's current mode
    InvalidMode,
    /// Pin is already claimed
    PinInUse,
}

/// ADC-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError {
    /// Channel not present or not configured
    InvalidChannel,
    /// Channel setup rejected by the converter
    SetupFailed,
    /// Conversion did not complete
    ReadFailed,
}

/// PWM-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmError {
    /// Duty cycle outside `0.0..=1.0`
    InvalidDutyCycle,
    /// Frequency outside the supported range
    InvalidFrequency,
    /// Channel already taken or absent
    ChannelUnavailable,
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::I2c(e) => write!(f, "I2C error: {:?}", e),
            PlatformError::Gpio(e) => write!(f, "GPIO error: {:?}", e),
            PlatformError::Adc(e) => write!(f, "ADC error: {:?}", e),
            PlatformError::Pwm(e) => write!(f, "PWM error: {:?}", e),
            PlatformError::InitializationFailed => write!(f, "Peripheral initialization failed"),
            PlatformError::InvalidConfig => write!(f, "Invalid configuration"),
        }
    }
}
