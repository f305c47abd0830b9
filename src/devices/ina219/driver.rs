//! INA219 I2C Driver Implementation
//!
//! Bus voltage, shunt voltage and calibrated current readout over the shared
//! transport.

use super::registers;
use crate::log_info;
use crate::platform::traits::i2c::I2cBusInterface;
use crate::transport::engine::I2cTransport;
use crate::transport::error::TransportError;
use crate::transport::handle::DeviceHandle;
use crate::transport::lock::SharedPort;
use crate::transport::state::PortState;

/// Largest accepted current LSB. Keeps `i16` raw counts times the LSB
/// within `i32` microamps.
const MAX_CURRENT_LSB_UA: u32 = u16::MAX as u32;

/// INA219 bus power monitor
///
/// Holds a device handle into the shared transport, so several monitors (or
/// unrelated devices) can sit on the same port; each read claims the port
/// just for its own transaction.
pub struct Ina219<'a, B, P>
where
    B: I2cBusInterface,
    P: SharedPort<PortState>,
{
    transport: &'a I2cTransport<B, P>,
    device: DeviceHandle,
    /// Current register LSB in microamps; 0 until calibrated
    current_lsb_ua: u32,
}

impl<'a, B, P> Ina219<'a, B, P>
where
    B: I2cBusInterface,
    P: SharedPort<PortState>,
{
    /// Monitor behind `device` on the shared transport. Uncalibrated; bus
    /// and shunt voltage work immediately, current needs
    /// [`calibrate`](Ina219::calibrate).
    pub fn new(transport: &'a I2cTransport<B, P>, device: DeviceHandle) -> Self {
        Self {
            transport,
            device,
            current_lsb_ua: 0,
        }
    }

    /// Program the calibration register.
    ///
    /// Per the datasheet, `calibration = trunc(0.04096 / (current_lsb *
    /// r_shunt))` with `current_lsb` in amps and `r_shunt` in ohms; pass the
    /// same LSB here in microamps so current readout can scale raw counts.
    ///
    /// # Errors
    ///
    /// [`TransportError::InvalidArgument`] if `current_lsb_ua` is zero or
    /// above 65 535 microamps; the register is left untouched. The bound
    /// keeps scaled readings within `i32`.
    pub fn calibrate(
        &mut self,
        calibration: u16,
        current_lsb_ua: u32,
    ) -> Result<(), TransportError> {
        if current_lsb_ua == 0 || current_lsb_ua > MAX_CURRENT_LSB_UA {
            return Err(TransportError::InvalidArgument);
        }
        self.transport.write_register(
            &self.device,
            registers::CALIBRATION,
            &calibration.to_be_bytes(),
        )?;
        self.current_lsb_ua = current_lsb_ua;
        log_info!(
            "INA219 calibrated: cal={} lsb={} uA",
            calibration,
            current_lsb_ua
        );
        Ok(())
    }

    /// Bus voltage in millivolts.
    pub fn bus_voltage_mv(&self) -> Result<u16, TransportError> {
        let raw = self.read_u16(registers::BUS_VOLTAGE)?;
        // Value sits in bits 15..3; bits 1..0 are conversion-ready/overflow.
        Ok((raw >> 3) * registers::BUS_VOLTAGE_LSB_MV)
    }

    /// Shunt voltage in microvolts, signed.
    pub fn shunt_voltage_uv(&self) -> Result<i32, TransportError> {
        let raw = self.read_u16(registers::SHUNT_VOLTAGE)? as i16;
        Ok(raw as i32 * registers::SHUNT_VOLTAGE_LSB_UV)
    }

    /// Raw current register counts, signed.
    pub fn current_raw(&self) -> Result<i16, TransportError> {
        Ok(self.read_u16(registers::CURRENT)? as i16)
    }

    /// Current in microamps, signed.
    ///
    /// # Errors
    ///
    /// [`TransportError::InvalidArgument`] if the monitor was never
    /// calibrated.
    pub fn current_ua(&self) -> Result<i32, TransportError> {
        if self.current_lsb_ua == 0 {
            return Err(TransportError::InvalidArgument);
        }
        let raw = self.current_raw()?;
        // LSB capped at u16::MAX by calibrate, so the product fits i32.
        Ok(i32::from(raw) * self.current_lsb_ua as i32)
    }

    fn read_u16(&self, register: u8) -> Result<u16, TransportError> {
        let mut buffer = [0u8; 2];
        self.transport
            .read_register(&self.device, register, &mut buffer)?;
        Ok(u16::from_be_bytes(buffer))
    }
}
