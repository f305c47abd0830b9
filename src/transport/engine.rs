//! Shared I2C transport engine
//!
//! One [`I2cTransport`] owns the board's I2C controllers and the per-port
//! state table. Any number of callers, each holding a [`DeviceHandle`],
//! funnel their transfers through it; the engine claims the port, brings the
//! hardware to the handle's configuration (reprogramming only on change) and
//! runs the transfer as one combined transaction, all under the port claim.

use core::time::Duration;

use embedded_hal::i2c::Operation;

use crate::platform::error::I2cError;
use crate::platform::traits::i2c::{BusConfig, I2cBusInterface, PortId, PORT_COUNT};
use crate::transport::error::TransportError;
use crate::transport::handle::DeviceHandle;
use crate::transport::lock::SharedPort;
use crate::transport::state::PortState;
use crate::{log_debug, log_error, log_warn};

/// Transport tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    /// Longest a caller waits for a claimed port before failing with
    /// [`TransportError::Timeout`]. `Duration::MAX` waits without bound.
    pub lock_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_secs(1),
        }
    }
}

/// Shared, port-multiplexed I2C transport.
///
/// Many logical devices with possibly different bus configurations share the
/// board's fixed set of controllers. Per port, the engine keeps the last
/// configuration pushed to the hardware and skips reprogramming while
/// consecutive transfers agree on it; a handle wanting something else pays
/// one release-and-reconfigure before its transfer.
///
/// The port lock strategy `P` is chosen at construction and covers the whole
/// check-configuration-then-transfer sequence, so an in-flight transaction
/// can never be corrupted by another device's differing configuration.
/// Transfers on distinct ports proceed independently.
///
/// Controller readiness is sampled under the claim on every call. A port
/// whose controller stopped answering fails each transfer with
/// [`TransportError::DeviceNotReady`] but keeps its cached configuration, so
/// a controller that comes back serves matching handles without a
/// reconfigure.
///
/// Errors are returned, never retried; see [`TransportError`] for which ones
/// are worth retrying from the caller's side.
pub struct I2cTransport<B, P>
where
    B: I2cBusInterface,
    P: SharedPort<PortState>,
{
    bus: B,
    ports: [P; PORT_COUNT],
    config: TransportConfig,
}

impl<B, P> I2cTransport<B, P>
where
    B: I2cBusInterface,
    P: SharedPort<PortState>,
{
    /// Take ownership of the board's controllers behind `bus`.
    ///
    /// Every port starts unconfigured with its claim slot open.
    pub fn new(bus: B, config: TransportConfig) -> Self {
        Self {
            bus,
            ports: core::array::from_fn(|_| P::new(PortState::new())),
            config,
        }
    }

    /// The underlying controller interface.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Write `data` to `device`, optionally preceded by a register selector.
    ///
    /// `register` and `data` go out as two back-to-back write phases of one
    /// transaction (no STOP between them); an empty `register` collapses it
    /// to a single phase.
    ///
    /// # Errors
    ///
    /// [`TransportError::InvalidArgument`] if `data` is empty; otherwise the
    /// claim/configure/transfer errors described on [`TransportError`].
    pub fn write(
        &self,
        device: &DeviceHandle,
        register: &[u8],
        data: &[u8],
    ) -> Result<(), TransportError> {
        if data.is_empty() {
            return Err(TransportError::InvalidArgument);
        }
        if register.is_empty() {
            self.run(device, &mut [Operation::Write(data)]).map(|_| ())
        } else {
            self.run(
                device,
                &mut [Operation::Write(register), Operation::Write(data)],
            )
            .map(|_| ())
        }
    }

    /// Read into `buffer` from `device`, optionally selecting a register
    /// first.
    ///
    /// A non-empty `register` is written, then `buffer` is filled, in one
    /// transaction with a repeated START between the phases. Returns the
    /// number of bytes read.
    ///
    /// # Errors
    ///
    /// [`TransportError::InvalidArgument`] if `buffer` is empty; otherwise
    /// the claim/configure/transfer errors described on [`TransportError`].
    pub fn read(
        &self,
        device: &DeviceHandle,
        register: &[u8],
        buffer: &mut [u8],
    ) -> Result<usize, TransportError> {
        if buffer.is_empty() {
            return Err(TransportError::InvalidArgument);
        }
        if register.is_empty() {
            self.run(device, &mut [Operation::Read(buffer)])
        } else {
            self.run(
                device,
                &mut [Operation::Write(register), Operation::Read(buffer)],
            )
        }
    }

    /// Write `data` to a single-byte register of `device`.
    pub fn write_register(
        &self,
        device: &DeviceHandle,
        register: u8,
        data: &[u8],
    ) -> Result<(), TransportError> {
        self.write(device, core::slice::from_ref(&register), data)
    }

    /// Read from a single-byte register of `device`.
    pub fn read_register(
        &self,
        device: &DeviceHandle,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<usize, TransportError> {
        self.read(device, core::slice::from_ref(&register), buffer)
    }

    /// Run an arbitrary phase sequence against `device` as one transaction.
    ///
    /// For callers whose access pattern does not fit [`read`]/[`write`],
    /// including the [`embedded-hal`] adapter. Returns the number of bytes
    /// read across all read phases.
    ///
    /// [`read`]: I2cTransport::read
    /// [`write`]: I2cTransport::write
    /// [`embedded-hal`]: crate::transport::hal::PortDevice
    ///
    /// # Errors
    ///
    /// [`TransportError::InvalidArgument`] on an empty phase sequence;
    /// otherwise the claim/configure/transfer errors described on
    /// [`TransportError`].
    pub fn transaction(
        &self,
        device: &DeviceHandle,
        operations: &mut [Operation<'_>],
    ) -> Result<usize, TransportError> {
        if operations.is_empty() {
            return Err(TransportError::InvalidArgument);
        }
        self.run(device, operations)
    }

    /// Release every configured port.
    ///
    /// Per port: claim it, release the hardware registration if the
    /// controller still answers, drop the cached configuration, then reopen
    /// the claim slot unconditionally so no waiter stays parked. Hardware
    /// errors are logged and skipped; shutdown never fails.
    ///
    /// Runs automatically when the transport is dropped. Transfers racing a
    /// shutdown are a caller bug; they may observe [`TransportError::Timeout`]
    /// or run against a released port.
    pub fn shutdown(&self) {
        for port in PortId::all() {
            let slot = &self.ports[port.index()];
            let claimed = slot.try_with(self.config.lock_timeout, |state| {
                if state.is_configured() {
                    if self.bus.is_ready(port) {
                        if let Err(e) = self.bus.unregister(port) {
                            log_warn!(
                                "releasing port {} during shutdown failed: {:?}",
                                port.index(),
                                e
                            );
                        }
                    }
                    state.clear();
                }
            });
            if claimed.is_none() {
                log_warn!("port {} still claimed during shutdown", port.index());
            }
            slot.reset(PortState::new());
        }
    }

    /// Claim the port, reconcile its configuration, then transfer if the
    /// controller answers.
    fn run(
        &self,
        device: &DeviceHandle,
        operations: &mut [Operation<'_>],
    ) -> Result<usize, TransportError> {
        let port = device.port();
        let claimed = self.ports[port.index()].try_with(self.config.lock_timeout, |state| {
            self.ensure_configured(port, device.config(), state)?;
            // Checked on every call: the configuration cache can outlive a
            // controller that stopped answering.
            if !self.bus.is_ready(port) {
                log_error!("I2C controller on port {} not ready", port.index());
                return Err(TransportError::DeviceNotReady);
            }
            match self.bus.transfer(port, device.address(), operations) {
                Ok(count) => Ok(count),
                Err(I2cError::Timeout) => {
                    log_error!(
                        "transfer timed out for device {} on port {}",
                        device.address().raw(),
                        port.index()
                    );
                    Err(TransportError::Timeout)
                }
                Err(e) => {
                    log_error!(
                        "transfer failed for device {} on port {}: {:?}",
                        device.address().raw(),
                        port.index(),
                        e
                    );
                    Err(TransportError::Transfer(e))
                }
            }
        });
        match claimed {
            Some(result) => result,
            None => {
                log_error!("could not claim port {}", port.index());
                Err(TransportError::Timeout)
            }
        }
    }

    /// Bring the hardware behind `port` to `desired`, touching it only when
    /// the cached configuration differs. Caller holds the port claim.
    fn ensure_configured(
        &self,
        port: PortId,
        desired: &BusConfig,
        state: &mut PortState,
    ) -> Result<(), TransportError> {
        if state.matches(desired) {
            return Ok(());
        }
        if !self.bus.is_ready(port) {
            log_error!("I2C controller on port {} not ready", port.index());
            return Err(TransportError::DeviceNotReady);
        }
        if state.is_configured() {
            log_debug!("reconfiguring port {}", port.index());
            if let Err(e) = self.bus.unregister(port) {
                log_warn!(
                    "releasing old configuration on port {} failed: {:?}",
                    port.index(),
                    e
                );
            }
        }
        // Cache dropped before touching the hardware: a rejected configure
        // must not leave a stale entry claiming to be applied.
        state.clear();
        self.bus.configure(port, desired).map_err(|e| {
            log_error!("configuring port {} failed: {:?}", port.index(), e);
            TransportError::Configuration(e)
        })?;
        state.set_applied(*desired);
        log_debug!("port {} configured at {} Hz", port.index(), desired.frequency);
        Ok(())
    }
}

impl<B, P> Drop for I2cTransport<B, P>
where
    B: I2cBusInterface,
    P: SharedPort<PortState>,
{
    fn drop(&mut self) {
        self.shutdown();
    }
}
