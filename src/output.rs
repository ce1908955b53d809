//! Downstream record for a decoded reading
//!
//! Field names and order follow [`crate::device::OUTPUT_FIELDS`].

use crate::device::MODEL_NAME;
use crate::models::Reading;
use serde::Serialize;
use std::fmt;

/// Integrity mechanism that vouched for the reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Integrity {
    /// Additive checksum, no CRC or cryptographic guarantee
    #[serde(rename = "CHECKSUM")]
    Checksum,
}

impl fmt::Display for Integrity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integrity::Checksum => write!(f, "CHECKSUM"),
        }
    }
}

/// Structured record handed to the reporting layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRecord {
    /// Constant model name
    pub model: &'static str,
    /// Device id
    pub id: u8,
    /// Channel 1-4
    pub channel: u8,
    /// "LOW" or "OK"
    pub battery: &'static str,
    /// Temperature, one decimal place
    #[serde(rename = "temperature_C")]
    pub temperature_c: f64,
    /// Humidity percent
    pub humidity: u8,
    /// Integrity marker
    pub mic: Integrity,
}

impl OutputRecord {
    /// Serialize as a single JSON object
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<&Reading> for OutputRecord {
    fn from(reading: &Reading) -> Self {
        Self {
            model: MODEL_NAME,
            id: reading.id,
            channel: reading.channel,
            battery: reading.battery_status(),
            temperature_c: f64::from(reading.temperature_tenths) / 10.0,
            humidity: reading.humidity_pct,
            mic: Integrity::Checksum,
        }
    }
}

impl fmt::Display for OutputRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "model: {} | id: {} | channel: {} | battery: {} | temperature_C: {:.1} C | humidity: {} % | mic: {}",
            self.model,
            self.id,
            self.channel,
            self.battery,
            self.temperature_c,
            self.humidity,
            self.mic
        )
    }
}
