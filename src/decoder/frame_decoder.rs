//! Frame decoder - validation stages and field extraction

use crate::decoder::checksum;
use crate::decoder::diagnostics::{Diagnostics, NoDiagnostics};
use crate::decoder::failure::FailureReason;
use crate::decoder::fields;
use crate::models::{RawFrame, Reading};

/// Temperatures must lie strictly inside (-50.0, 200.0) °C
pub const TEMPERATURE_MIN_TENTHS: i16 = -500;
/// Upper temperature bound in tenths, exclusive
pub const TEMPERATURE_MAX_TENTHS: i16 = 2000;
/// Highest plausible humidity
pub const HUMIDITY_MAX: u8 = 100;

/// Stateless decoder for one 42-bit frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameDecoder;

impl FrameDecoder {
    /// Validate a frame and extract its reading
    pub fn decode(frame: &RawFrame) -> Result<Reading, FailureReason> {
        Self::decode_with(frame, &mut NoDiagnostics)
    }

    /// Same as [`FrameDecoder::decode`], reporting each stage to `diagnostics`
    pub fn decode_with<D>(frame: &RawFrame, diagnostics: &mut D) -> Result<Reading, FailureReason>
    where
        D: Diagnostics + ?Sized,
    {
        let result = Self::run_stages(frame, diagnostics);
        match &result {
            Ok(reading) => diagnostics.frame_decoded(frame, reading),
            Err(reason) => diagnostics.frame_rejected(frame, reason),
        }
        result
    }

    fn run_stages<D>(frame: &RawFrame, diagnostics: &mut D) -> Result<Reading, FailureReason>
    where
        D: Diagnostics + ?Sized,
    {
        // Stage 1: no-signal buffers never count as checksum failures
        if Self::is_all_zero(frame) {
            return Err(FailureReason::AllZero);
        }
        diagnostics.frame_received(frame);

        // Stage 2: additive checksum
        let computed = checksum::compute(frame);
        let received = checksum::received(frame);
        diagnostics.checksum_computed(computed, received);
        if computed != received {
            return Err(FailureReason::ChecksumMismatch { computed, received });
        }

        // Stage 3: fields
        let id = fields::id(frame);
        let channel = fields::channel(frame);
        let temperature_tenths = fields::temperature_tenths(fields::temperature_raw(frame));
        let humidity_pct = fields::humidity(frame);
        let battery_low = fields::battery_low(frame);

        // Stage 4: plausibility
        Self::check_temperature(temperature_tenths)?;
        Self::check_humidity(humidity_pct)?;

        Ok(Reading {
            id,
            channel,
            temperature_tenths,
            temperature_c: fields::tenths_to_celsius(temperature_tenths),
            humidity_pct,
            battery_low,
            checksum_valid: true,
        })
    }

    /// Id, channel, temperature and humidity bytes all zero
    pub fn is_all_zero(frame: &RawFrame) -> bool {
        frame.as_bytes()[..4].iter().all(|&b| b == 0)
    }

    fn check_temperature(tenths: i16) -> Result<(), FailureReason> {
        if tenths <= TEMPERATURE_MIN_TENTHS || tenths >= TEMPERATURE_MAX_TENTHS {
            return Err(FailureReason::TemperatureOutOfRange { tenths });
        }
        Ok(())
    }

    fn check_humidity(humidity: u8) -> Result<(), FailureReason> {
        if humidity > HUMIDITY_MAX {
            return Err(FailureReason::HumidityOutOfRange { humidity });
        }
        Ok(())
    }
}
