//! Platform abstraction layer
//!
//! This module provides hardware abstraction over the I2C controllers, GPIO
//! pins, ADC channels and PWM slices the board exposes. All platform-specific
//! code lives behind the traits defined here.

pub mod error;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{AdcError, GpioError, I2cError, PlatformError, PwmError, Result};
pub use traits::{
    AdcInterface, BusConfig, BusFlags, DeviceAddress, GpioInterface, I2cBusInterface, PortId,
    PwmInterface, PORT_COUNT,
};
