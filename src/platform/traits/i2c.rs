//! I2C controller interface trait
//!
//! This module defines the port-addressed I2C controller interface that
//! platform implementations must provide, together with the vocabulary types
//! shared by the transport layer: port identifiers, device addresses and bus
//! configuration.

use bitflags::bitflags;
use embedded_hal::i2c::Operation;

use crate::platform::error::I2cError;

/// Number of I2C controllers (ports) on the board.
pub const PORT_COUNT: usize = 2;

/// Identifier of one I2C controller.
///
/// A `PortId` can only be obtained through [`PortId::new`], so holding one
/// proves the index is in range. It is plain data and can be copied freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortId(u8);

impl PortId {
    /// Validate a raw port index. Returns `None` if it does not name a
    /// controller present on the board.
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < PORT_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Index of this port, suitable for array lookups.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over every port on the board, in index order.
    pub fn all() -> impl Iterator<Item = PortId> {
        (0..PORT_COUNT as u8).map(PortId)
    }
}

/// Address of a device on an I2C bus.
///
/// Seven-bit addresses cover the common case; ten-bit addressing is carried
/// for controllers that support it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceAddress {
    value: u16,
    ten_bit: bool,
}

impl DeviceAddress {
    /// Seven-bit address. Returns `None` above 0x7F.
    pub const fn seven_bit(value: u8) -> Option<Self> {
        if value <= 0x7F {
            Some(Self {
                value: value as u16,
                ten_bit: false,
            })
        } else {
            None
        }
    }

    /// Ten-bit address. Returns `None` above 0x3FF.
    pub const fn ten_bit(value: u16) -> Option<Self> {
        if value <= 0x3FF {
            Some(Self {
                value,
                ten_bit: true,
            })
        } else {
            None
        }
    }

    /// Raw address value as sent on the wire (before R/W shifting).
    pub const fn raw(self) -> u16 {
        self.value
    }

    /// Whether this is a ten-bit address.
    pub const fn is_ten_bit(self) -> bool {
        self.ten_bit
    }
}

bitflags! {
    /// Electrical and protocol options applied when configuring a port.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BusFlags: u8 {
        /// Enable the internal pull-up on SCL.
        const SCL_PULLUP = 1 << 0;
        /// Enable the internal pull-up on SDA.
        const SDA_PULLUP = 1 << 1;
        /// Allow devices to stretch the clock.
        const CLOCK_STRETCHING = 1 << 2;
    }
}

// The derive cannot reach inside the bitflags-generated struct, so log the
// raw bits.
#[cfg(feature = "defmt")]
impl defmt::Format for BusFlags {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "BusFlags({=u8:#b})", self.bits());
    }
}

/// I2C bus configuration for one port.
///
/// Two configurations are interchangeable exactly when every field compares
/// equal; the transport uses that to decide whether a port must be
/// reprogrammed before a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    /// GPIO pin routed to SCL
    pub scl_pin: u8,
    /// GPIO pin routed to SDA
    pub sda_pin: u8,
    /// Bus frequency in Hz (typically 100_000 or 400_000)
    pub frequency: u32,
    /// Pull-up and protocol options
    pub flags: BusFlags,
}

impl BusConfig {
    /// Standard-mode bus frequency (100 kHz).
    pub const FREQ_STANDARD: u32 = 100_000;
    /// Fast-mode bus frequency (400 kHz).
    pub const FREQ_FAST: u32 = 400_000;
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            // I2C0 default pins on the board (GP4/GP5)
            scl_pin: 5,
            sda_pin: 4,
            frequency: Self::FREQ_STANDARD,
            flags: BusFlags::SCL_PULLUP | BusFlags::SDA_PULLUP,
        }
    }
}

/// Port-addressed I2C controller interface
///
/// Platform implementations provide one object covering every controller on
/// the board; operations name the port they act on. The shared transport is
/// the intended caller.
///
/// # Safety Invariants
///
/// - `configure`, `unregister` and `transfer` for the same port are never
///   called concurrently (the transport serializes them under the port lock)
/// - Calls for distinct ports may overlap and must not interfere
/// - A port must be configured before `transfer` is called on it
pub trait I2cBusInterface {
    /// Whether the controller behind `port` is powered and responsive.
    fn is_ready(&self, port: PortId) -> bool;

    /// Program pins, frequency and flags for `port`.
    ///
    /// Replaces any previous configuration of the port.
    ///
    /// # Errors
    ///
    /// Returns an [`I2cError`] if the controller rejects the configuration;
    /// the port is left unconfigured in that case.
    fn configure(&self, port: PortId, config: &BusConfig) -> Result<(), I2cError>;

    /// Release the controller behind `port`, undoing [`configure`].
    ///
    /// [`configure`]: I2cBusInterface::configure
    ///
    /// # Errors
    ///
    /// Returns an [`I2cError`] if the release fails; callers treat this as
    /// best-effort.
    fn unregister(&self, port: PortId) -> Result<(), I2cError>;

    /// Execute a transaction on `port` addressed to `address`.
    ///
    /// Phases run back to back with a repeated START between direction
    /// changes and a single STOP after the last phase. Returns the number of
    /// bytes read back across all read phases.
    ///
    /// # Errors
    ///
    /// Returns an [`I2cError`] if any phase fails; no partial result is
    /// reported. Implementations must give up with [`I2cError::Timeout`]
    /// rather than retry internally.
    fn transfer(
        &self,
        port: PortId,
        address: DeviceAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<usize, I2cError>;
}
