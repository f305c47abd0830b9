//! Board peripherals
//!
//! Straight-line drivers over the platform traits: each call is a fixed
//! sequence of peripheral operations with no internal state machine. Retry
//! and backoff policy belongs to the application layer above.

pub mod adc;
pub mod bar_graph;
pub mod motor;

pub use adc::{AdcSampler, MAX_CHANNELS};
pub use bar_graph::{BarGraph, BarGraphMode, SEGMENTS};
pub use motor::DriveMotor;
