//! Declarative description of the sensor, shared with the radio front end
//!
//! Nothing here takes part in decoding. The acquisition layer uses the timing
//! and repeat threshold to isolate frames; the output layer uses the model
//! name and field list.

use std::fmt;

/// Model string reported with every reading
pub const MODEL_NAME: &str = "Noname chinese outdoor temperature & humidity sensor";

/// Repeated rows required before a frame is handed to the decoder.
/// The sensor sends 6 repeats separated by sync pulses.
pub const DEFAULT_MIN_REPEATS: u8 = 4;

/// Output record field names, in emission order
pub const OUTPUT_FIELDS: [&str; 7] = [
    "model",
    "id",
    "channel",
    "battery",
    "temperature_C",
    "humidity",
    "mic",
];

/// Nominal transmit interval in seconds
pub const TRANSMIT_INTERVAL_SECS: u32 = 50;

/// Line coding used by the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modulation {
    /// On-off keying, pulse position modulation
    OokPulsePpm,
}

impl fmt::Display for Modulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modulation::OokPulsePpm => write!(f, "OOK_PULSE_PPM"),
        }
    }
}

/// Pulse classifier thresholds, in microseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseTiming {
    /// Gap width of a short (0) symbol
    pub short_width: u32,
    /// Gap width of a long (1) symbol
    pub long_width: u32,
    /// Gap that ends a row
    pub gap_limit: u32,
    /// Gap that ends the whole capture
    pub reset_limit: u32,
}

/// Factory timing of the sensor
pub const DEFAULT_TIMING: PulseTiming = PulseTiming {
    short_width: 2000,
    long_width: 4000,
    gap_limit: 9000,
    reset_limit: 100_000,
};

/// Everything the front end needs to know about this device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceDescriptor {
    /// Model name
    pub name: &'static str,
    /// Modulation
    pub modulation: Modulation,
    /// Pulse timing
    pub timing: PulseTiming,
    /// Bits per row
    pub row_bits: usize,
    /// Matching rows required
    pub min_repeats: u8,
    /// Seconds between transmissions
    pub transmit_interval_secs: u32,
    /// Output field names
    pub fields: &'static [&'static str],
}

impl DeviceDescriptor {
    /// Descriptor with the factory timing
    pub const fn factory() -> Self {
        Self {
            name: MODEL_NAME,
            modulation: Modulation::OokPulsePpm,
            timing: DEFAULT_TIMING,
            row_bits: crate::models::FRAME_BITS,
            min_repeats: DEFAULT_MIN_REPEATS,
            transmit_interval_secs: TRANSMIT_INTERVAL_SECS,
            fields: &OUTPUT_FIELDS,
        }
    }

    /// Descriptor with environment overrides applied
    pub fn from_env() -> Self {
        Self {
            timing: crate::decoder::config::pulse_timing(),
            min_repeats: crate::decoder::config::min_repeats(),
            ..Self::factory()
        }
    }
}

impl Default for DeviceDescriptor {
    fn default() -> Self {
        Self::factory()
    }
}
