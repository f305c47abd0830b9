//! GPIO interface trait
//!
//! This module defines the GPIO (General Purpose Input/Output) interface
//! that platform implementations must provide.

use crate::platform::Result;

/// GPIO pin mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioMode {
    /// Electrically disconnected (no input buffer, no driver)
    Disconnected,
    /// High-impedance input
    Input,
    /// Input with the internal pull-up enabled
    InputPullUp,
    /// Input with the internal pull-down enabled
    InputPullDown,
    /// Push-pull output
    OutputPushPull,
    /// Open-drain output
    OutputOpenDrain,
}

/// GPIO interface trait
///
/// Every platform backend exposes its pins through this interface.
/// Display peripherals park unused pins in [`GpioMode::Disconnected`] so a
/// half-populated bar graph does not drive floating segments.
///
/// # Safety Invariants
///
/// - GPIO pin must be initialized before use
/// - Each pin instance has exactly one owner
/// - No concurrent access to the same GPIO pin from multiple contexts
/// - Pin number must be valid for the platform
pub trait GpioInterface {
    /// Drive the pin to the given logic level.
    ///
    /// Only valid in output modes.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio(GpioError::InvalidMode)` if the pin
    /// is not configured as an output.
    fn set_level(&mut self, high: bool) -> Result<()>;

    /// Drive the pin high (logic level 1)
    fn set_high(&mut self) -> Result<()> {
        self.set_level(true)
    }

    /// Drive the pin low (logic level 0)
    fn set_low(&mut self) -> Result<()> {
        self.set_level(false)
    }

    /// Current pin level: `true` when high.
    ///
    /// Valid in input and output modes alike.
    fn read(&self) -> bool;

    /// Reconfigure the pin's mode.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio` if the pin cannot take `mode`.
    fn set_mode(&mut self, mode: GpioMode) -> Result<()>;

    /// Mode the pin is currently in
    fn mode(&self) -> GpioMode;
}
