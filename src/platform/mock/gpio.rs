//! In-memory GPIO pin for tests

use crate::platform::{
    error::{GpioError, PlatformError},
    traits::{GpioInterface, GpioMode},
    Result,
};
use std::vec::Vec;

/// Mock GPIO pin
///
/// Tracks the pin's mode and level, and keeps the full history of levels
/// driven onto it so tests can assert on write sequences, not just the final
/// state.
#[derive(Debug, Default)]
pub struct MockGpio {
    state: bool,
    mode: Option<GpioMode>,
    driven: Vec<bool>,
}

impl MockGpio {
    /// Create a new mock GPIO, disconnected like an unclaimed pin
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new mock GPIO already in push-pull output mode
    pub fn new_output() -> Self {
        Self {
            mode: Some(GpioMode::OutputPushPull),
            ..Self::default()
        }
    }

    /// Create a new mock GPIO already in input mode
    pub fn new_input() -> Self {
        Self {
            mode: Some(GpioMode::Input),
            ..Self::default()
        }
    }

    /// Simulate an external signal arriving at the pin
    pub fn set_input_state(&mut self, high: bool) {
        self.state = high;
    }

    /// Every level driven onto the pin, oldest first
    pub fn driven_levels(&self) -> &[bool] {
        &self.driven
    }

    fn is_output(&self) -> bool {
        matches!(
            self.mode,
            Some(GpioMode::OutputPushPull) | Some(GpioMode::OutputOpenDrain)
        )
    }
}

impl GpioInterface for MockGpio {
    fn set_level(&mut self, high: bool) -> Result<()> {
        if !self.is_output() {
            return Err(PlatformError::Gpio(GpioError::InvalidMode));
        }
        self.state = high;
        self.driven.push(high);
        Ok(())
    }

    fn read(&self) -> bool {
        self.state
    }

    fn set_mode(&mut self, mode: GpioMode) -> Result<()> {
        self.mode = Some(mode);
        Ok(())
    }

    fn mode(&self) -> GpioMode {
        self.mode.unwrap_or(GpioMode::Disconnected)
    }
}
