//! ADC interface trait
//!
//! This module defines the analog-to-digital converter interface that
//! platform implementations must provide.

use crate::platform::Result;

/// Input gain applied before conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcGain {
    /// Unity gain
    X1,
    /// Double the input
    X2,
    /// Quadruple the input
    X4,
}

/// Voltage reference for conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcReference {
    /// Internal bandgap reference
    Internal,
    /// Supply rail reference
    Vdd,
    /// External reference pin
    External,
}

/// Per-channel ADC configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdcChannelConfig {
    /// Input gain
    pub gain: AdcGain,
    /// Conversion reference
    pub reference: AdcReference,
    /// Acquisition time in microseconds; 0 lets the converter pick
    pub acquisition_time_us: u32,
    /// Conversion resolution in bits
    pub resolution_bits: u8,
}

impl Default for AdcChannelConfig {
    fn default() -> Self {
        Self {
            gain: AdcGain::X1,
            reference: AdcReference::Internal,
            acquisition_time_us: 0,
            resolution_bits: 12,
        }
    }
}

/// ADC interface trait
///
/// Platform implementations must provide this interface for analog sampling.
///
/// # Safety Invariants
///
/// - A channel must be set up before it is sampled
/// - Only one owner per converter instance
/// - No concurrent access to the same converter from multiple contexts
pub trait AdcInterface {
    /// Configure one input channel.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Adc` if the channel does not exist or the
    /// converter rejects the configuration.
    fn setup_channel(&mut self, channel: u8, config: &AdcChannelConfig) -> Result<()>;

    /// Run one conversion on `channel` and return the raw counts.
    ///
    /// The value is right-aligned in the configured resolution.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Adc` if the channel was never set up or the
    /// conversion fails.
    fn sample(&mut self, channel: u8) -> Result<u16>;
}
