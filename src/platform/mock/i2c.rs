//! Mock I2C bus implementation for testing

use crate::platform::error::I2cError;
use crate::platform::traits::i2c::{
    BusConfig, DeviceAddress, I2cBusInterface, PortId, PORT_COUNT,
};
use embedded_hal::i2c::Operation;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use std::vec::Vec;

/// One phase of a recorded transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusOp {
    /// Bytes written to the device
    Write(Vec<u8>),
    /// Number of bytes read from the device
    Read(usize),
}

/// Transaction log entry for test verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusTransaction {
    /// Port the transaction ran on
    pub port: PortId,
    /// Addressed device
    pub address: DeviceAddress,
    /// Configuration the port held when the transfer ran
    pub config: Option<BusConfig>,
    /// Phases in wire order
    pub operations: Vec<BusOp>,
}

/// Test-side handle to a transfer gate installed with
/// [`MockI2cBus::gate_transfer`].
///
/// The next transfer on the gated port signals `wait_entered` and then parks
/// until `release` is called (or the gate is dropped), letting a test hold a
/// transfer in flight at a known point.
pub struct TransferGate {
    entered: Receiver<()>,
    release: Sender<()>,
}

impl TransferGate {
    /// Block until the gated transfer has started, up to `timeout`.
    ///
    /// Returns `false` if no transfer arrived in time.
    pub fn wait_entered(&self, timeout: Duration) -> bool {
        self.entered.recv_timeout(timeout).is_ok()
    }

    /// Let the parked transfer complete.
    pub fn release(&self) {
        let _ = self.release.send(());
    }
}

// Bus-side half of a gate: notify entry, wait for release.
struct GateHandles {
    entered: Sender<()>,
    release: Receiver<()>,
}

#[derive(Default)]
struct PortScript {
    ready: bool,
    applied: Option<BusConfig>,
    configure_calls: u32,
    unregister_calls: u32,
    read_data: Vec<u8>,
    configure_error: Option<I2cError>,
    transfer_error: Option<I2cError>,
    unregister_error: Option<I2cError>,
    gate: Option<GateHandles>,
}

struct Inner {
    ports: [PortScript; PORT_COUNT],
    transactions: Vec<BusTransaction>,
}

/// Mock I2C bus covering every port on the board
///
/// Records all transactions for test verification, returns pre-programmed
/// read data, and can script per-port readiness and failures. Cloning yields
/// another handle to the same bus, so a test can keep one while the transport
/// owns the other.
#[derive(Clone)]
pub struct MockI2cBus {
    shared: Arc<Mutex<Inner>>,
}

impl MockI2cBus {
    /// Create a new mock bus with every port ready and unconfigured.
    pub fn new() -> Self {
        let mut inner = Inner {
            ports: Default::default(),
            transactions: Vec::new(),
        };
        for port in inner.ports.iter_mut() {
            port.ready = true;
        }
        Self {
            shared: Arc::new(Mutex::new(inner)),
        }
    }

    fn with_inner<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        let mut inner = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut inner)
    }

    /// Script whether the controller behind `port` reports ready.
    pub fn set_ready(&self, port: PortId, ready: bool) {
        self.with_inner(|inner| inner.ports[port.index()].ready = ready);
    }

    /// Set data to return for read phases on `port`; reads drain it in order.
    pub fn set_read_data(&self, port: PortId, data: &[u8]) {
        self.with_inner(|inner| inner.ports[port.index()].read_data = data.to_vec());
    }

    /// Script `configure` on `port` to fail with `error` until cleared.
    pub fn set_configure_error(&self, port: PortId, error: Option<I2cError>) {
        self.with_inner(|inner| inner.ports[port.index()].configure_error = error);
    }

    /// Script `transfer` on `port` to fail with `error` until cleared.
    pub fn set_transfer_error(&self, port: PortId, error: Option<I2cError>) {
        self.with_inner(|inner| inner.ports[port.index()].transfer_error = error);
    }

    /// Script `unregister` on `port` to fail with `error` until cleared.
    pub fn set_unregister_error(&self, port: PortId, error: Option<I2cError>) {
        self.with_inner(|inner| inner.ports[port.index()].unregister_error = error);
    }

    /// Park the next transfer on `port` until the returned gate is released.
    pub fn gate_transfer(&self, port: PortId) -> TransferGate {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        self.with_inner(|inner| {
            inner.ports[port.index()].gate = Some(GateHandles {
                entered: entered_tx,
                release: release_rx,
            });
        });
        TransferGate {
            entered: entered_rx,
            release: release_tx,
        }
    }

    /// Configuration currently applied to `port`, if any.
    pub fn applied_config(&self, port: PortId) -> Option<BusConfig> {
        self.with_inner(|inner| inner.ports[port.index()].applied)
    }

    /// Number of `configure` calls seen on `port` (including failed ones).
    pub fn configure_calls(&self, port: PortId) -> u32 {
        self.with_inner(|inner| inner.ports[port.index()].configure_calls)
    }

    /// Number of `unregister` calls seen on `port` (including failed ones).
    pub fn unregister_calls(&self, port: PortId) -> u32 {
        self.with_inner(|inner| inner.ports[port.index()].unregister_calls)
    }

    /// Get transaction log (for test verification)
    pub fn transactions(&self) -> Vec<BusTransaction> {
        self.with_inner(|inner| inner.transactions.clone())
    }

    /// Clear transaction log
    pub fn clear_transactions(&self) {
        self.with_inner(|inner| inner.transactions.clear());
    }
}

impl Default for MockI2cBus {
    fn default() -> Self {
        Self::new()
    }
}

impl I2cBusInterface for MockI2cBus {
    fn is_ready(&self, port: PortId) -> bool {
        self.with_inner(|inner| inner.ports[port.index()].ready)
    }

    fn configure(&self, port: PortId, config: &BusConfig) -> Result<(), I2cError> {
        self.with_inner(|inner| {
            let script = &mut inner.ports[port.index()];
            script.configure_calls += 1;
            if let Some(error) = script.configure_error {
                return Err(error);
            }
            script.applied = Some(*config);
            Ok(())
        })
    }

    fn unregister(&self, port: PortId) -> Result<(), I2cError> {
        self.with_inner(|inner| {
            let script = &mut inner.ports[port.index()];
            script.unregister_calls += 1;
            if let Some(error) = script.unregister_error {
                return Err(error);
            }
            script.applied = None;
            Ok(())
        })
    }

    fn transfer(
        &self,
        port: PortId,
        address: DeviceAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<usize, I2cError> {
        // Park on an installed gate without holding the bus lock, so
        // transfers on other ports keep running.
        let gate = self.with_inner(|inner| inner.ports[port.index()].gate.take());
        if let Some(gate) = gate {
            let _ = gate.entered.send(());
            let _ = gate.release.recv();
        }

        self.with_inner(|inner| {
            let script = &mut inner.ports[port.index()];
            let config = script.applied;
            let mut recorded = Vec::with_capacity(operations.len());
            let mut bytes_read = 0;
            let error = script.transfer_error;

            for operation in operations.iter_mut() {
                match operation {
                    Operation::Write(bytes) => recorded.push(BusOp::Write(bytes.to_vec())),
                    Operation::Read(buffer) => {
                        if error.is_none() {
                            let to_read = core::cmp::min(buffer.len(), script.read_data.len());
                            buffer[..to_read].copy_from_slice(&script.read_data[..to_read]);
                            script.read_data.drain(..to_read);
                            bytes_read += buffer.len();
                        }
                        recorded.push(BusOp::Read(buffer.len()));
                    }
                }
            }

            inner.transactions.push(BusTransaction {
                port,
                address,
                config,
                operations: recorded,
            });

            match error {
                Some(error) => Err(error),
                None => Ok(bytes_read),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(index: u8) -> PortId {
        PortId::new(index).unwrap()
    }

    fn addr(value: u8) -> DeviceAddress {
        DeviceAddress::seven_bit(value).unwrap()
    }

    #[test]
    fn test_mock_records_phases_in_wire_order() {
        let bus = MockI2cBus::new();
        bus.set_read_data(port(0), &[0xAA, 0xBB]);

        let mut buffer = [0u8; 2];
        let count = bus
            .transfer(
                port(0),
                addr(0x50),
                &mut [Operation::Write(&[0x10]), Operation::Read(&mut buffer)],
            )
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(buffer, [0xAA, 0xBB]);

        let transactions = bus.transactions();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].port, port(0));
        assert_eq!(transactions[0].address, addr(0x50));
        assert_eq!(
            transactions[0].operations,
            vec![BusOp::Write(vec![0x10]), BusOp::Read(2)]
        );
    }

    #[test]
    fn test_mock_read_data_drains_across_transfers() {
        let bus = MockI2cBus::new();
        bus.set_read_data(port(1), &[0x01, 0x02, 0x03]);

        let mut first = [0u8; 2];
        bus.transfer(port(1), addr(0x20), &mut [Operation::Read(&mut first)])
            .unwrap();
        assert_eq!(first, [0x01, 0x02]);

        let mut second = [0u8; 1];
        bus.transfer(port(1), addr(0x20), &mut [Operation::Read(&mut second)])
            .unwrap();
        assert_eq!(second, [0x03]);
    }

    #[test]
    fn test_mock_configure_tracks_applied_config() {
        let bus = MockI2cBus::new();
        assert_eq!(bus.applied_config(port(0)), None);

        let config = BusConfig::default();
        bus.configure(port(0), &config).unwrap();
        assert_eq!(bus.applied_config(port(0)), Some(config));
        assert_eq!(bus.configure_calls(port(0)), 1);

        bus.unregister(port(0)).unwrap();
        assert_eq!(bus.applied_config(port(0)), None);
        assert_eq!(bus.unregister_calls(port(0)), 1);
    }

    #[test]
    fn test_mock_scripted_errors_are_sticky_until_cleared() {
        let bus = MockI2cBus::new();
        bus.set_configure_error(port(0), Some(I2cError::BusError));

        let config = BusConfig::default();
        assert_eq!(
            bus.configure(port(0), &config),
            Err(I2cError::BusError)
        );
        assert_eq!(bus.applied_config(port(0)), None);

        bus.set_configure_error(port(0), None);
        bus.configure(port(0), &config).unwrap();
        assert_eq!(bus.applied_config(port(0)), Some(config));
        assert_eq!(bus.configure_calls(port(0)), 2);
    }

    #[test]
    fn test_mock_transfer_error_still_logs_the_attempt() {
        let bus = MockI2cBus::new();
        bus.set_transfer_error(port(0), Some(I2cError::Nack));

        let mut buffer = [0u8; 4];
        let result = bus.transfer(port(0), addr(0x42), &mut [Operation::Read(&mut buffer)]);
        assert_eq!(result, Err(I2cError::Nack));
        assert_eq!(buffer, [0u8; 4]);
        assert_eq!(bus.transactions().len(), 1);
    }

    #[test]
    fn test_mock_ready_flag_per_port() {
        let bus = MockI2cBus::new();
        assert!(bus.is_ready(port(0)));
        bus.set_ready(port(0), false);
        assert!(!bus.is_ready(port(0)));
        assert!(bus.is_ready(port(1)));
    }

    #[test]
    fn test_mock_gate_parks_transfer_until_released() {
        let bus = MockI2cBus::new();
        let gate = bus.gate_transfer(port(0));

        let worker_bus = bus.clone();
        let worker = std::thread::spawn(move || {
            worker_bus
                .transfer(port(0), addr(0x11), &mut [Operation::Write(&[0x00])])
                .unwrap();
        });

        assert!(gate.wait_entered(Duration::from_secs(1)));
        // Transfer is parked; nothing recorded yet.
        assert!(bus.transactions().is_empty());

        gate.release();
        worker.join().unwrap();
        assert_eq!(bus.transactions().len(), 1);
    }
}
