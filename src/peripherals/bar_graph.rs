//! LED bar graph display
//!
//! Eight segments driven directly from GPIO pins. The graph runs in one of
//! two populations chosen at construction: all eight segments, or only the
//! upper four with the lower pins parked disconnected.

use crate::platform::{
    traits::{GpioInterface, GpioMode},
    PlatformError, Result,
};
use crate::log_info;

/// Number of segments on the bar graph.
pub const SEGMENTS: usize = 8;

/// Which segments are populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BarGraphMode {
    /// All eight segments active.
    Full,
    /// Only the upper four segments active; the rest stay disconnected.
    Half,
}

impl BarGraphMode {
    /// Active-segment mask, walked MSB-first against pin order.
    const fn mask(self) -> u8 {
        match self {
            BarGraphMode::Full => 0xFF,
            BarGraphMode::Half => 0x0F,
        }
    }
}

/// Eight-segment LED bar graph.
///
/// Pin index 0 is the leftmost segment and maps to the pattern's most
/// significant bit. In [`BarGraphMode::Half`] the pattern still shifts
/// through all eight positions, so the upper pins display the pattern's low
/// nibble.
pub struct BarGraph<G>
where
    G: GpioInterface,
{
    pins: [G; SEGMENTS],
    mode: BarGraphMode,
    enabled: bool,
}

impl<G> BarGraph<G>
where
    G: GpioInterface,
{
    /// Wrap the segment pins. Nothing is driven until
    /// [`enable`](BarGraph::enable).
    pub fn new(pins: [G; SEGMENTS], mode: BarGraphMode) -> Self {
        Self {
            pins,
            mode,
            enabled: false,
        }
    }

    /// Configure the segment pins: active ones become outputs starting dark,
    /// unpopulated ones are parked disconnected.
    pub fn enable(&mut self) -> Result<()> {
        let mut mask = self.mode.mask();
        for pin in self.pins.iter_mut() {
            if mask & 0x80 == 0x80 {
                pin.set_mode(GpioMode::OutputPushPull)?;
                pin.set_low()?;
            } else {
                pin.set_mode(GpioMode::Disconnected)?;
            }
            mask <<= 1;
        }
        self.enabled = true;
        log_info!("bar graph enabled in {:?} mode", self.mode);
        Ok(())
    }

    /// Show `pattern` on the graph, most significant bit on pin 0.
    ///
    /// Bits landing on unpopulated segments are skipped.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InitializationFailed` before
    /// [`enable`](BarGraph::enable); pin errors propagate.
    pub fn set(&mut self, pattern: u8) -> Result<()> {
        if !self.enabled {
            return Err(PlatformError::InitializationFailed);
        }
        let mut mask = self.mode.mask();
        let mut data = pattern;
        for pin in self.pins.iter_mut() {
            if mask & 0x80 == 0x80 {
                pin.set_level(data & 0x80 == 0x80)?;
            }
            mask <<= 1;
            data <<= 1;
        }
        Ok(())
    }

    /// Turn every driven segment off.
    pub fn clear(&mut self) -> Result<()> {
        self.set(0)
    }
}

/// Pack per-segment flags into a display pattern, `flags[0]` as the most
/// significant bit.
pub fn pattern_from_flags(flags: &[bool; SEGMENTS]) -> u8 {
    flags
        .iter()
        .fold(0u8, |pattern, &flag| (pattern << 1) | u8::from(flag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockGpio;

    fn pins() -> [MockGpio; SEGMENTS] {
        core::array::from_fn(|_| MockGpio::new())
    }

    #[test]
    fn enable_full_mode_drives_every_pin_dark() {
        let mut graph = BarGraph::new(pins(), BarGraphMode::Full);
        graph.enable().unwrap();
        for pin in graph.pins.iter() {
            assert_eq!(pin.mode(), GpioMode::OutputPushPull);
            assert!(!pin.read());
        }
    }

    #[test]
    fn enable_half_mode_parks_lower_pins() {
        let mut graph = BarGraph::new(pins(), BarGraphMode::Half);
        graph.enable().unwrap();
        for pin in graph.pins[..4].iter() {
            assert_eq!(pin.mode(), GpioMode::Disconnected);
        }
        for pin in graph.pins[4..].iter() {
            assert_eq!(pin.mode(), GpioMode::OutputPushPull);
        }
    }

    #[test]
    fn full_mode_pattern_maps_msb_to_pin_zero() {
        let mut graph = BarGraph::new(pins(), BarGraphMode::Full);
        graph.enable().unwrap();
        graph.set(0b1011_0001).unwrap();

        let levels: Vec<bool> = graph.pins.iter().map(|p| p.read()).collect();
        assert_eq!(
            levels,
            vec![true, false, true, true, false, false, false, true]
        );
    }

    #[test]
    fn half_mode_upper_pins_show_low_nibble() {
        let mut graph = BarGraph::new(pins(), BarGraphMode::Half);
        graph.enable().unwrap();
        graph.set(0b0000_1010).unwrap();

        let levels: Vec<bool> = graph.pins[4..].iter().map(|p| p.read()).collect();
        assert_eq!(levels, vec![true, false, true, false]);
        // Parked pins stay untouched.
        assert!(graph.pins[..4].iter().all(|p| !p.read()));
    }

    #[test]
    fn set_before_enable_fails() {
        let mut graph = BarGraph::new(pins(), BarGraphMode::Full);
        assert_eq!(graph.set(0xFF), Err(PlatformError::InitializationFailed));
    }

    #[test]
    fn clear_blanks_driven_segments() {
        let mut graph = BarGraph::new(pins(), BarGraphMode::Full);
        graph.enable().unwrap();
        graph.set(0xFF).unwrap();
        graph.clear().unwrap();
        assert!(graph.pins.iter().all(|p| !p.read()));
        // Each pin saw exactly: dark at enable, lit, dark again.
        for pin in graph.pins.iter() {
            assert_eq!(pin.driven_levels(), &[false, true, false]);
        }
    }

    #[test]
    fn pattern_from_flags_packs_msb_first() {
        let flags = [true, false, true, true, false, false, false, true];
        assert_eq!(pattern_from_flags(&flags), 0b1011_0001);
        assert_eq!(pattern_from_flags(&[false; SEGMENTS]), 0);
        assert_eq!(pattern_from_flags(&[true; SEGMENTS]), 0xFF);
    }
}
