//! ADC channel sampling
//!
//! A fixed set of analog inputs (battery rails, current senses) sampled one
//! channel at a time, raw counts out. Channels are configured once at enable
//! and validated on every read.

use heapless::Vec;

use crate::platform::{
    error::{AdcError, PlatformError},
    traits::{AdcChannelConfig, AdcInterface},
    Result,
};
use crate::{log_error, log_info};

/// Most channels one sampler can manage.
pub const MAX_CHANNELS: usize = 8;

/// The board's stock analog inputs.
pub const DEFAULT_CHANNELS: [u8; 5] = [0, 1, 2, 3, 4];

/// Multi-channel sampler over one converter.
///
/// Owns the converter and the channel list. `enable` pushes the shared
/// channel configuration to the hardware; until then every read fails.
pub struct AdcSampler<A>
where
    A: AdcInterface,
{
    adc: A,
    channels: Vec<u8, MAX_CHANNELS>,
    config: AdcChannelConfig,
    enabled: bool,
}

impl<A> AdcSampler<A>
where
    A: AdcInterface,
{
    /// Sampler over `channels` with the default channel configuration
    /// (unity gain, internal reference, 12-bit).
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InvalidConfig` if `channels` is empty or
    /// longer than [`MAX_CHANNELS`].
    pub fn new(adc: A, channels: &[u8]) -> Result<Self> {
        Self::with_config(adc, channels, AdcChannelConfig::default())
    }

    /// Sampler over `channels` with an explicit channel configuration.
    pub fn with_config(adc: A, channels: &[u8], config: AdcChannelConfig) -> Result<Self> {
        if channels.is_empty() {
            return Err(PlatformError::InvalidConfig);
        }
        let channels = Vec::from_slice(channels).map_err(|_| PlatformError::InvalidConfig)?;
        Ok(Self {
            adc,
            channels,
            config,
            enabled: false,
        })
    }

    /// Configure every channel on the converter.
    pub fn enable(&mut self) -> Result<()> {
        for &channel in self.channels.iter() {
            if let Err(e) = self.adc.setup_channel(channel, &self.config) {
                log_error!("ADC channel {} setup failed: {:?}", channel, e);
                return Err(e);
            }
        }
        self.enabled = true;
        log_info!("ADC ready with {} channels", self.channels.len());
        Ok(())
    }

    /// Raw counts from one channel.
    ///
    /// # Errors
    ///
    /// `PlatformError::InitializationFailed` before [`enable`], and
    /// `PlatformError::Adc(AdcError::InvalidChannel)` for a channel outside
    /// the configured set.
    ///
    /// [`enable`]: AdcSampler::enable
    pub fn sample(&mut self, channel: u8) -> Result<u16> {
        if !self.enabled {
            return Err(PlatformError::InitializationFailed);
        }
        if !self.channels.contains(&channel) {
            return Err(PlatformError::Adc(AdcError::InvalidChannel));
        }
        self.adc.sample(channel)
    }

    /// Sample every configured channel, in list order, into `out`.
    ///
    /// Returns the number of values written.
    ///
    /// # Errors
    ///
    /// `PlatformError::InvalidConfig` if `out` is shorter than the channel
    /// list; converter errors propagate per channel.
    pub fn sample_all(&mut self, out: &mut [u16]) -> Result<usize> {
        if !self.enabled {
            return Err(PlatformError::InitializationFailed);
        }
        if out.len() < self.channels.len() {
            return Err(PlatformError::InvalidConfig);
        }
        for (slot, &channel) in out.iter_mut().zip(self.channels.iter()) {
            *slot = self.adc.sample(channel)?;
        }
        Ok(self.channels.len())
    }

    /// Channels this sampler covers, in sampling order.
    pub fn channels(&self) -> &[u8] {
        &self.channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockAdc;

    fn sampler() -> AdcSampler<MockAdc> {
        AdcSampler::new(MockAdc::new(), &DEFAULT_CHANNELS).unwrap()
    }

    #[test]
    fn enable_configures_every_channel() {
        let mut sampler = sampler();
        sampler.enable().unwrap();
        for &channel in DEFAULT_CHANNELS.iter() {
            assert_eq!(
                sampler.adc.channel_config(channel),
                Some(AdcChannelConfig::default())
            );
        }
    }

    #[test]
    fn sample_before_enable_fails() {
        let mut sampler = sampler();
        assert_eq!(sampler.sample(0), Err(PlatformError::InitializationFailed));
    }

    #[test]
    fn sample_returns_scripted_raw_counts() {
        let mut sampler = sampler();
        sampler.adc.set_samples(3, &[0x0FFF]);
        sampler.enable().unwrap();
        assert_eq!(sampler.sample(3), Ok(0x0FFF));
    }

    #[test]
    fn sample_rejects_channel_outside_the_set() {
        let mut sampler = sampler();
        sampler.enable().unwrap();
        assert_eq!(
            sampler.sample(7),
            Err(PlatformError::Adc(AdcError::InvalidChannel))
        );
    }

    #[test]
    fn sample_all_fills_in_list_order() {
        let mut sampler = sampler();
        for (i, &channel) in DEFAULT_CHANNELS.iter().enumerate() {
            sampler.adc.set_samples(channel, &[100 * (i as u16 + 1)]);
        }
        sampler.enable().unwrap();

        let mut out = [0u16; DEFAULT_CHANNELS.len()];
        let count = sampler.sample_all(&mut out).unwrap();
        assert_eq!(count, DEFAULT_CHANNELS.len());
        assert_eq!(out, [100, 200, 300, 400, 500]);
    }

    #[test]
    fn sample_all_rejects_short_buffer() {
        let mut sampler = sampler();
        sampler.enable().unwrap();
        let mut out = [0u16; 2];
        assert_eq!(
            sampler.sample_all(&mut out),
            Err(PlatformError::InvalidConfig)
        );
    }

    #[test]
    fn constructor_validates_channel_list() {
        assert_eq!(
            AdcSampler::new(MockAdc::new(), &[]).err(),
            Some(PlatformError::InvalidConfig)
        );
        let too_many = [0u8; MAX_CHANNELS + 1];
        assert_eq!(
            AdcSampler::new(MockAdc::new(), &too_many).err(),
            Some(PlatformError::InvalidConfig)
        );
    }
}
