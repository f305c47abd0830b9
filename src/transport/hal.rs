//! `embedded-hal` adapter
//!
//! Lets driver crates written against [`embedded_hal::i2c::I2c`] run on top
//! of the shared transport without knowing about ports or handles.

use embedded_hal::i2c::{ErrorType, I2c, Operation, SevenBitAddress};

use crate::platform::traits::i2c::{BusConfig, DeviceAddress, I2cBusInterface, PortId};
use crate::transport::engine::I2cTransport;
use crate::transport::error::TransportError;
use crate::transport::handle::DeviceHandle;
use crate::transport::lock::SharedPort;
use crate::transport::state::PortState;

/// One port of the shared transport, viewed as a plain I2C bus.
///
/// Every transaction goes through the transport's claim-and-reconcile path,
/// so a `PortDevice` coexists with direct [`DeviceHandle`] users on the same
/// port; each transaction runs under the bus configuration fixed at
/// construction.
pub struct PortDevice<'a, B, P>
where
    B: I2cBusInterface,
    P: SharedPort<PortState>,
{
    transport: &'a I2cTransport<B, P>,
    port: PortId,
    config: BusConfig,
}

impl<'a, B, P> PortDevice<'a, B, P>
where
    B: I2cBusInterface,
    P: SharedPort<PortState>,
{
    /// View `port` of `transport` as an I2C bus running `config`.
    pub fn new(transport: &'a I2cTransport<B, P>, port: PortId, config: BusConfig) -> Self {
        Self {
            transport,
            port,
            config,
        }
    }
}

impl<B, P> ErrorType for PortDevice<'_, B, P>
where
    B: I2cBusInterface,
    P: SharedPort<PortState>,
{
    type Error = TransportError;
}

impl<B, P> I2c<SevenBitAddress> for PortDevice<'_, B, P>
where
    B: I2cBusInterface,
    P: SharedPort<PortState>,
{
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let address =
            DeviceAddress::seven_bit(address).ok_or(TransportError::InvalidArgument)?;
        let handle = DeviceHandle::new(self.port, address, self.config);
        self.transport.transaction(&handle, operations).map(|_| ())
    }
}
