//! Device handles

use crate::platform::traits::i2c::{BusConfig, DeviceAddress, PortId};

/// Caller-held descriptor of one logical I2C device.
///
/// A handle names the port the device sits on, its bus address, and the bus
/// configuration it needs. It is plain data: copy it freely, share it across
/// threads, keep it on the stack. The transport only reads it, so many
/// handles may name the same port with different configurations; the
/// transport reconciles them per transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceHandle {
    port: PortId,
    address: DeviceAddress,
    config: BusConfig,
}

impl DeviceHandle {
    /// Describe a device on `port` at `address` wanting `config`.
    pub const fn new(port: PortId, address: DeviceAddress, config: BusConfig) -> Self {
        Self {
            port,
            address,
            config,
        }
    }

    /// Port the device sits on.
    pub const fn port(&self) -> PortId {
        self.port
    }

    /// Bus address of the device.
    pub const fn address(&self) -> DeviceAddress {
        self.address
    }

    /// Bus configuration the device needs.
    pub const fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Same device, different bus frequency.
    pub fn with_frequency(mut self, frequency: u32) -> Self {
        self.config.frequency = frequency;
        self
    }
}
