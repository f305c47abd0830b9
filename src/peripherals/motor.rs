//! Drive motor control
//!
//! This module implements speed and direction control for H-bridge drivers
//! like the DRV8837, which take one PWM signal per direction input.
//!
//! ## H-bridge truth table
//!
//! | FWD | REV | Motor state                                |
//! |-----|-----|--------------------------------------------|
//! | 0   | 0   | Coast (High-Z, motor freewheels)           |
//! | PWM | 0   | Forward (speed = PWM duty cycle)           |
//! | 0   | PWM | Reverse (speed = PWM duty cycle)           |
//! | 1   | 1   | Brake (both terminals shorted)             |

use crate::platform::{traits::PwmInterface, PlatformError, Result};
use crate::{log_debug, log_info};

/// PWM carrier used when the caller has no preference; above the audible
/// range.
pub const DEFAULT_CARRIER_HZ: u32 = 20_000;

/// One drive motor behind an H-bridge.
///
/// Owns the two direction PWM outputs. The motor starts disarmed: outputs
/// disabled, zero duty. [`arm`](DriveMotor::arm) programs the carrier and
/// starts both outputs in coast.
pub struct DriveMotor<F, R>
where
    F: PwmInterface,
    R: PwmInterface,
{
    forward: F,
    reverse: R,
    armed: bool,
}

impl<F, R> DriveMotor<F, R>
where
    F: PwmInterface,
    R: PwmInterface,
{
    /// Wrap the two direction outputs. The motor is disarmed until
    /// [`arm`](DriveMotor::arm) is called.
    pub fn new(forward: F, reverse: R) -> Self {
        Self {
            forward,
            reverse,
            armed: false,
        }
    }

    /// Program `carrier_hz` on both outputs and start them in coast.
    pub fn arm(&mut self, carrier_hz: u32) -> Result<()> {
        self.forward.set_frequency(carrier_hz)?;
        self.reverse.set_frequency(carrier_hz)?;
        self.forward.set_duty_cycle(0.0)?;
        self.reverse.set_duty_cycle(0.0)?;
        self.forward.enable()?;
        self.reverse.enable()?;
        self.armed = true;
        log_info!("drive motor armed at {} Hz", carrier_hz);
        Ok(())
    }

    /// Coast, then stop driving both outputs.
    pub fn disarm(&mut self) -> Result<()> {
        self.stop()?;
        self.forward.disable()?;
        self.reverse.disable()?;
        self.armed = false;
        Ok(())
    }

    /// Set signed speed in `-1.0..=1.0` per the H-bridge truth table.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InitializationFailed` while disarmed and
    /// `PlatformError::InvalidConfig` outside the valid range.
    pub fn set_speed(&mut self, speed: f32) -> Result<()> {
        if !self.armed {
            return Err(PlatformError::InitializationFailed);
        }
        if !(-1.0..=1.0).contains(&speed) {
            return Err(PlatformError::InvalidConfig);
        }

        log_debug!("motor speed {}", speed);

        if speed > 0.0 {
            // Forward: FWD=PWM, REV=LOW
            self.forward.set_duty_cycle(speed)?;
            self.reverse.set_duty_cycle(0.0)?;
        } else if speed < 0.0 {
            // Reverse: FWD=LOW, REV=PWM
            self.forward.set_duty_cycle(0.0)?;
            self.reverse.set_duty_cycle(-speed)?;
        } else {
            // Coast: FWD=LOW, REV=LOW
            self.forward.set_duty_cycle(0.0)?;
            self.reverse.set_duty_cycle(0.0)?;
        }
        Ok(())
    }

    /// Coast to a stop (both outputs low, motor freewheels).
    pub fn stop(&mut self) -> Result<()> {
        self.forward.set_duty_cycle(0.0)?;
        self.reverse.set_duty_cycle(0.0)?;
        Ok(())
    }

    /// Short brake (both outputs high, motor actively resists).
    pub fn brake(&mut self) -> Result<()> {
        if !self.armed {
            return Err(PlatformError::InitializationFailed);
        }
        self.forward.set_duty_cycle(1.0)?;
        self.reverse.set_duty_cycle(1.0)?;
        Ok(())
    }

    /// Whether the outputs are live.
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockPwm;

    fn armed_motor() -> DriveMotor<MockPwm, MockPwm> {
        let mut motor = DriveMotor::new(MockPwm::new(), MockPwm::new());
        motor.arm(DEFAULT_CARRIER_HZ).unwrap();
        motor
    }

    #[test]
    fn arm_programs_carrier_and_enables_outputs() {
        let motor = armed_motor();
        assert!(motor.is_armed());
        assert_eq!(motor.forward.frequency_hz(), DEFAULT_CARRIER_HZ);
        assert_eq!(motor.reverse.frequency_hz(), DEFAULT_CARRIER_HZ);
        assert!(motor.forward.is_enabled());
        assert!(motor.reverse.is_enabled());
        assert_eq!(motor.forward.duty_cycle(), 0.0);
        assert_eq!(motor.reverse.duty_cycle(), 0.0);
    }

    #[test]
    fn forward_drives_only_the_forward_output() {
        let mut motor = armed_motor();
        motor.set_speed(0.75).unwrap();
        assert_eq!(motor.forward.duty_cycle(), 0.75);
        assert_eq!(motor.reverse.duty_cycle(), 0.0);
    }

    #[test]
    fn reverse_drives_only_the_reverse_output() {
        let mut motor = armed_motor();
        motor.set_speed(-0.5).unwrap();
        assert_eq!(motor.forward.duty_cycle(), 0.0);
        assert_eq!(motor.reverse.duty_cycle(), 0.5);
    }

    #[test]
    fn zero_speed_coasts() {
        let mut motor = armed_motor();
        motor.set_speed(0.6).unwrap();
        motor.set_speed(0.0).unwrap();
        assert_eq!(motor.forward.duty_cycle(), 0.0);
        assert_eq!(motor.reverse.duty_cycle(), 0.0);
    }

    #[test]
    fn brake_drives_both_outputs_high() {
        let mut motor = armed_motor();
        motor.brake().unwrap();
        assert_eq!(motor.forward.duty_cycle(), 1.0);
        assert_eq!(motor.reverse.duty_cycle(), 1.0);
    }

    #[test]
    fn out_of_range_speed_is_rejected() {
        let mut motor = armed_motor();
        assert_eq!(motor.set_speed(1.5), Err(PlatformError::InvalidConfig));
        assert_eq!(motor.set_speed(-1.5), Err(PlatformError::InvalidConfig));

        // Boundaries are valid
        motor.set_speed(1.0).unwrap();
        assert_eq!(motor.forward.duty_cycle(), 1.0);
        motor.set_speed(-1.0).unwrap();
        assert_eq!(motor.reverse.duty_cycle(), 1.0);
    }

    #[test]
    fn disarmed_motor_rejects_drive_commands() {
        let mut motor = DriveMotor::new(MockPwm::new(), MockPwm::new());
        assert_eq!(
            motor.set_speed(0.5),
            Err(PlatformError::InitializationFailed)
        );
        assert_eq!(motor.brake(), Err(PlatformError::InitializationFailed));
    }

    #[test]
    fn disarm_coasts_and_disables() {
        let mut motor = armed_motor();
        motor.set_speed(0.8).unwrap();
        motor.disarm().unwrap();
        assert!(!motor.is_armed());
        assert_eq!(motor.forward.duty_cycle(), 0.0);
        assert!(!motor.forward.is_enabled());
        assert!(!motor.reverse.is_enabled());
        // Coast was commanded before the outputs went dead.
        assert_eq!(motor.forward.duty_history(), &[0.0, 0.8, 0.0]);
    }
}
