//! Frame synthesis, the inverse of field extraction
//!
//! Produces checksum-valid frames for tests, benchmarks and the `thtool
//! encode` command. Values are masked to their field widths, not validated,
//! so implausible readings can be built on purpose.

use crate::decoder::checksum;
use crate::models::{FRAME_BYTES, RawFrame, Reading};

/// Builder for a checksum-valid frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBuilder {
    id: u8,
    channel: u8,
    temperature_tenths: i16,
    humidity: u8,
    battery_low: bool,
}

impl FrameBuilder {
    /// Start a frame for device `id` on channel 1, 0.0 °C, 0 %
    pub fn new(id: u8) -> Self {
        Self {
            id,
            channel: 1,
            temperature_tenths: 0,
            humidity: 0,
            battery_low: false,
        }
    }

    /// Channel 1-4; other values wrap into the 2-bit field
    pub fn channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }

    /// Temperature in tenths of a degree (12-bit two's complement on the wire)
    pub fn temperature_tenths(mut self, tenths: i16) -> Self {
        self.temperature_tenths = tenths;
        self
    }

    /// Humidity in percent (0-127 fits the field)
    pub fn humidity(mut self, humidity: u8) -> Self {
        self.humidity = humidity;
        self
    }

    /// Battery-low flag
    pub fn battery_low(mut self, low: bool) -> Self {
        self.battery_low = low;
        self
    }

    /// Pack the fields and append the checksum
    pub fn build(&self) -> RawFrame {
        let temp = (self.temperature_tenths as u16) & 0x0fff;
        let mut bytes = [0u8; FRAME_BYTES];
        bytes[0] = self.id;
        bytes[1] = ((self.channel.wrapping_sub(1) & 0x03) << 4) | (temp >> 8) as u8;
        bytes[2] = (temp & 0xff) as u8;
        bytes[3] = self.humidity << 1;
        bytes[4] = if self.battery_low { 0x10 } else { 0x00 };

        let sum = checksum::compute(&RawFrame::new(bytes));
        checksum::store(&mut bytes, sum);
        RawFrame::new(bytes)
    }
}

/// Re-encode a decoded reading; unknown bits come out as zero
pub fn encode(reading: &Reading) -> RawFrame {
    FrameBuilder::new(reading.id)
        .channel(reading.channel)
        .temperature_tenths(reading.temperature_tenths)
        .humidity(reading.humidity_pct)
        .battery_low(reading.battery_low)
        .build()
}
