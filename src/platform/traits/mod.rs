//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod adc;
pub mod gpio;
pub mod i2c;
pub mod pwm;

// Re-export trait interfaces
pub use adc::{AdcChannelConfig, AdcGain, AdcInterface, AdcReference};
pub use gpio::{GpioInterface, GpioMode};
pub use i2c::{BusConfig, BusFlags, DeviceAddress, I2cBusInterface, PortId, PORT_COUNT};
pub use pwm::PwmInterface;
