//! Cached per-port configuration state

use crate::platform::traits::i2c::BusConfig;

/// Mutable state of one I2C port.
///
/// Only reachable through the port's [`SharedPort`] claim, so every reader
/// sees the configuration a transfer actually ran under. `applied` holds the
/// configuration last pushed to the hardware; `None` means the port has never
/// been configured, or its last configuration attempt failed.
///
/// [`SharedPort`]: crate::transport::lock::SharedPort
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortState {
    applied: Option<BusConfig>,
}

impl PortState {
    /// Fresh state: nothing applied.
    pub const fn new() -> Self {
        Self { applied: None }
    }

    /// Whether the hardware currently holds a configuration for this port.
    pub fn is_configured(&self) -> bool {
        self.applied.is_some()
    }

    /// Whether the hardware currently holds exactly `config`.
    pub(crate) fn matches(&self, config: &BusConfig) -> bool {
        self.applied.as_ref() == Some(config)
    }

    /// Forget the applied configuration (hardware released or about to be
    /// reprogrammed).
    pub(crate) fn clear(&mut self) {
        self.applied = None;
    }

    /// Record `config` as applied to the hardware.
    pub(crate) fn set_applied(&mut self, config: BusConfig) {
        self.applied = Some(config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unconfigured() {
        let state = PortState::new();
        assert!(!state.is_configured());
        assert!(!state.matches(&BusConfig::default()));
    }

    #[test]
    fn matches_requires_exact_config() {
        let mut state = PortState::new();
        let config = BusConfig::default();
        state.set_applied(config);
        assert!(state.is_configured());
        assert!(state.matches(&config));

        let mut other = config;
        other.frequency = BusConfig::FREQ_FAST;
        assert!(!state.matches(&other));

        state.clear();
        assert!(!state.matches(&config));
    }
}
