//! Mock platform implementation for testing
//!
//! In-memory stand-ins for the platform traits so transport and peripheral
//! code can be unit tested without hardware. Each mock records what was done
//! to it for later assertions.
//!
//! # Feature Gate
//!
//! Available during test builds (`#[cfg(test)]`) and whenever the `mock`
//! feature is enabled, so integration tests and downstream crates can reuse
//! the mocks.

#![cfg(any(test, feature = "mock"))]

mod adc;
mod gpio;
mod i2c;
mod pwm;

pub use adc::{MockAdc, MOCK_ADC_CHANNELS};
pub use gpio::MockGpio;
pub use i2c::{BusOp, BusTransaction, MockI2cBus, TransferGate};
pub use pwm::MockPwm;
