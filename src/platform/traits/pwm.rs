//! PWM interface trait
//!
//! This module defines the PWM output interface that platform implementations
//! must provide. Motor drivers own one instance per direction input.

use crate::platform::Result;

/// PWM interface trait
///
/// # Safety Invariants
///
/// - Only one owner per PWM output instance
/// - Duty cycle set while disabled takes effect on enable
pub trait PwmInterface {
    /// Set the duty cycle as a fraction in `0.0..=1.0`.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Pwm(PwmError::InvalidDutyCycle)` outside the
    /// valid range.
    fn set_duty_cycle(&mut self, duty: f32) -> Result<()>;

    /// Set the carrier frequency in Hz.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Pwm(PwmError::InvalidFrequency)` if the slice
    /// clock cannot divide down to the requested frequency.
    fn set_frequency(&mut self, frequency_hz: u32) -> Result<()>;

    /// Start driving the output.
    fn enable(&mut self) -> Result<()>;

    /// Stop driving the output; the pin idles low.
    fn disable(&mut self) -> Result<()>;
}
