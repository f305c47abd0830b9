//! Device drivers
//!
//! This module contains I2C device drivers built on the shared transport,
//! demonstrating how to write drivers that coexist on a multiplexed port.
//!
//! ## Modules
//!
//! - `ina219`: INA219 bus power monitor (voltage, current)

pub mod ina219;

pub use ina219::Ina219;
