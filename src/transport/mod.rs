//! Shared I2C transport
//!
//! A fixed set of physical I2C controllers (ports) is shared by any number
//! of logical devices, each described by a caller-held [`DeviceHandle`].
//! The [`I2cTransport`] engine serializes access per port, caches the bus
//! configuration last applied to each port and reprograms the hardware only
//! when the active handle wants something different, then runs combined
//! write/read transactions without an intervening STOP.
//!
//! Lock behavior is a type choice, not a runtime branch: pick a
//! [`lock::SharedPort`] strategy when constructing the transport.

pub mod engine;
pub mod error;
pub mod hal;
pub mod handle;
pub mod lock;
pub mod state;

pub use engine::{I2cTransport, TransportConfig};
pub use error::TransportError;
pub use hal::PortDevice;
pub use handle::DeviceHandle;
#[cfg(any(test, feature = "std"))]
pub use lock::BoundedPort;
#[cfg(feature = "embassy")]
pub use lock::CriticalSectionPort;
pub use lock::{SharedPort, UnlockedPort};
pub use state::PortState;

// The transport's vocabulary comes from the platform layer; re-exported so
// callers can use one import path.
pub use crate::platform::traits::i2c::{BusConfig, BusFlags, DeviceAddress, PortId, PORT_COUNT};
