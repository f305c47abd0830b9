//! INA219 Register Definitions
//!
//! Based on the INA219 datasheet (SBOS448G). All registers are 16 bits,
//! transferred big-endian.

#![allow(dead_code)]

// ============================================================================
// INA219 I2C Address
// ============================================================================

/// INA219 I2C address with A0/A1 grounded
pub const INA219_ADDR: u8 = 0x40;

// ============================================================================
// INA219 Registers
// ============================================================================

/// Configuration register (range, gain, ADC resolution, mode)
pub const CONFIG: u8 = 0x00;

/// Shunt voltage register, signed, LSB 10 uV
pub const SHUNT_VOLTAGE: u8 = 0x01;

/// Bus voltage register; value in bits 15..3, LSB 4 mV
pub const BUS_VOLTAGE: u8 = 0x02;

/// Power register, LSB = 20 x current LSB
pub const POWER: u8 = 0x03;

/// Current register, signed, LSB set by calibration
pub const CURRENT: u8 = 0x04;

/// Calibration register; scales the current and power registers
pub const CALIBRATION: u8 = 0x05;

// ============================================================================
// Field constants
// ============================================================================

/// CONFIG bit 15: reset all registers to defaults
pub const CONFIG_RST: u16 = 0x8000;

/// CONFIG power-on value
pub const CONFIG_DEFAULT: u16 = 0x399F;

/// Bus voltage LSB after the 3-bit shift, in millivolts
pub const BUS_VOLTAGE_LSB_MV: u16 = 4;

/// Shunt voltage LSB in microvolts
pub const SHUNT_VOLTAGE_LSB_UV: i32 = 10;
