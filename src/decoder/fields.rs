//! Fixed bit offsets of the sensor payload
//!
//! ```text
//! Byte:    0        1        2        3        4        5
//! Type:    IIIIIIII ??CCTTTT TTTTTTTT HHHHHHHH ???BXXXX XX
//! ```
//!
//! I = device id, C = channel, T = temperature, H = humidity,
//! B = battery low, X = checksum, ? = unknown.

use crate::models::RawFrame;

/// Sign bit of the 12-bit temperature field
const TEMPERATURE_SIGN_BIT: u16 = 0x800;
/// Offset applied when the sign bit is set
const TEMPERATURE_WRAP: i16 = 4096;

/// Device id, taken verbatim from byte 0
pub fn id(frame: &RawFrame) -> u8 {
    frame.byte(0)
}

/// Channel 1-4 from bits 10-11
pub fn channel(frame: &RawFrame) -> u8 {
    ((frame.byte(1) >> 4) & 0x03) + 1
}

/// Unsigned 12-bit temperature field
pub fn temperature_raw(frame: &RawFrame) -> u16 {
    (u16::from(frame.byte(1) & 0x0f) << 8) | u16::from(frame.byte(2))
}

/// Interpret the 12-bit field as signed tenths of a degree
pub fn temperature_tenths(raw: u16) -> i16 {
    let raw = (raw & 0x0fff) as i16;
    if raw as u16 & TEMPERATURE_SIGN_BIT != 0 {
        raw - TEMPERATURE_WRAP
    } else {
        raw
    }
}

/// Humidity percent; the low bit of byte 3 is dropped
pub fn humidity(frame: &RawFrame) -> u8 {
    frame.byte(3) >> 1
}

/// Battery-low flag at bit 4 of byte 4
pub fn battery_low(frame: &RawFrame) -> bool {
    (frame.byte(4) >> 4) & 0x01 == 1
}

/// Convert tenths of a degree into °C
pub fn tenths_to_celsius(tenths: i16) -> f32 {
    f32::from(tenths) / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawFrame {
        RawFrame::new([0x0e, 0x20, 0xcd, 0x80, 0x0c, 0x40])
    }

    #[test]
    fn test_sample_fields() {
        let frame = sample();
        assert_eq!(id(&frame), 0x0e);
        assert_eq!(channel(&frame), 3);
        assert_eq!(temperature_raw(&frame), 0x0cd);
        assert_eq!(humidity(&frame), 64);
        assert!(!battery_low(&frame));
    }

    #[test]
    fn test_temperature_sign() {
        assert_eq!(temperature_tenths(0x0cd), 205);
        assert_eq!(temperature_tenths(0xfa5), -91);
        assert_eq!(temperature_tenths(0x7ff), 2047);
        assert_eq!(temperature_tenths(0x800), -2048);
        assert_eq!(temperature_tenths(0xfff), -1);

        assert_eq!(tenths_to_celsius(205), 20.5);
        assert_eq!(tenths_to_celsius(-91), -9.1);
    }

    #[test]
    fn test_channel_ignores_unknown_bits() {
        // ?? bits set, CC = 00
        let frame = RawFrame::new([0x01, 0xc0, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(channel(&frame), 1);
        let frame = RawFrame::new([0x01, 0x30, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(channel(&frame), 4);
    }

    #[test]
    fn test_battery_and_humidity_bits() {
        let frame = RawFrame::new([0x01, 0x00, 0x00, 0xff, 0x10, 0x00]);
        assert!(battery_low(&frame));
        assert_eq!(humidity(&frame), 127);

        let frame = RawFrame::new([0x01, 0x00, 0x00, 0x81, 0xef, 0xff]);
        assert!(!battery_low(&frame));
        assert_eq!(humidity(&frame), 64);
    }
}
