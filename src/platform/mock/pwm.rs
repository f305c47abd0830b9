//! Mock PWM implementation for testing

use crate::platform::{
    error::{PlatformError, PwmError},
    traits::PwmInterface,
    Result,
};
use std::vec::Vec;

/// Mock PWM implementation
///
/// Tracks the output's carrier, enable state and every duty cycle written,
/// so tests can assert on command order (a motor must coast before its
/// outputs go dead, for instance), not just the final value.
#[derive(Debug, Default)]
pub struct MockPwm {
    duty_cycle: f32,
    frequency_hz: u32,
    enabled: bool,
    duty_history: Vec<f32>,
}

impl MockPwm {
    /// Create a new mock PWM, disabled with zero duty
    pub fn new() -> Self {
        Self::default()
    }

    /// Last duty cycle set (for test verification)
    pub fn duty_cycle(&self) -> f32 {
        self.duty_cycle
    }

    /// Last carrier frequency set (for test verification)
    pub fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    /// Whether the output is currently driven
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Every accepted duty cycle write, oldest first
    pub fn duty_history(&self) -> &[f32] {
        &self.duty_history
    }
}

impl PwmInterface for MockPwm {
    fn set_duty_cycle(&mut self, duty: f32) -> Result<()> {
        if !(0.0..=1.0).contains(&duty) {
            return Err(PlatformError::Pwm(PwmError::InvalidDutyCycle));
        }
        self.duty_cycle = duty;
        self.duty_history.push(duty);
        Ok(())
    }

    fn set_frequency(&mut self, frequency_hz: u32) -> Result<()> {
        if frequency_hz == 0 {
            return Err(PlatformError::Pwm(PwmError::InvalidFrequency));
        }
        self.frequency_hz = frequency_hz;
        Ok(())
    }

    fn enable(&mut self) -> Result<()> {
        self.enabled = true;
        Ok(())
    }

    fn disable(&mut self) -> Result<()> {
        self.enabled = false;
        Ok(())
    }
}
