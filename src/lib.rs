#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! wheelbase - Board support for a two-port I2C wheeled platform
//!
//! This library provides a shared I2C transport (per-port locking, cached bus
//! configuration, combined write/read transactions), the platform abstraction
//! it runs on, and the peripherals built on top of it.

// Platform abstraction layer (traits + host-side mocks)
pub mod platform;

// Shared I2C transport: port locks, lazy reconfiguration, transfer engine
pub mod transport;

// Peripherals driven through the platform layer
pub mod peripherals;

// I2C device drivers using the transport
pub mod devices;

// Logging macros (defmt on target, println on host)
pub mod logging;
