//! Mock ADC implementation for testing

use crate::platform::{
    error::{AdcError, PlatformError},
    traits::{AdcChannelConfig, AdcInterface},
    Result,
};
use std::collections::VecDeque;

/// Number of input channels the mock converter exposes.
pub const MOCK_ADC_CHANNELS: usize = 8;

/// Mock ADC implementation
///
/// Tracks per-channel configuration and returns scripted sample values in
/// FIFO order; an exhausted script reads as zero.
#[derive(Debug, Default)]
pub struct MockAdc {
    configs: [Option<AdcChannelConfig>; MOCK_ADC_CHANNELS],
    samples: [VecDeque<u16>; MOCK_ADC_CHANNELS],
}

impl MockAdc {
    /// Create a new mock ADC with no channels set up
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue raw sample values for `channel`
    pub fn set_samples(&mut self, channel: u8, values: &[u16]) {
        if let Some(queue) = self.samples.get_mut(channel as usize) {
            queue.extend(values.iter().copied());
        }
    }

    /// Configuration applied to `channel`, if any (for test verification)
    pub fn channel_config(&self, channel: u8) -> Option<AdcChannelConfig> {
        self.configs.get(channel as usize).copied().flatten()
    }
}

impl AdcInterface for MockAdc {
    fn setup_channel(&mut self, channel: u8, config: &AdcChannelConfig) -> Result<()> {
        match self.configs.get_mut(channel as usize) {
            Some(slot) => {
                *slot = Some(*config);
                Ok(())
            }
            None => Err(PlatformError::Adc(AdcError::InvalidChannel)),
        }
    }

    fn sample(&mut self, channel: u8) -> Result<u16> {
        let index = channel as usize;
        if self.configs.get(index).copied().flatten().is_none() {
            return Err(PlatformError::Adc(AdcError::InvalidChannel));
        }
        Ok(self.samples[index].pop_front().unwrap_or(0))
    }
}
