//! outdoor_th - decoder for a 42-bit outdoor temperature/humidity sensor
//!
//! Turns one repeat-confirmed radio frame into a validated reading: channel,
//! device id, temperature, humidity and battery status. Corrupted frames are
//! rejected by an additive nibble checksum, and checksum collisions that
//! produce implausible values are rejected by range checks.
//!
//! ```text
//! Byte:    0        1        2        3        4        5
//! Type:    IIIIIIII ??CCTTTT TTTTTTTT HHHHHHHH ???BXXXX XX
//! ```
//!
//! # Example
//! ```
//! use outdoor_th::{decode, output::OutputRecord};
//!
//! let reading = decode(&[0x0e, 0x20, 0xcd, 0x80, 0x0c, 0x40]).unwrap();
//! assert_eq!(reading.channel, 3);
//! assert_eq!(reading.temperature_c, 20.5);
//! assert_eq!(reading.humidity_pct, 64);
//!
//! let record = OutputRecord::from(&reading);
//! println!("{}", record.to_json().unwrap());
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Frame decoding (checksum, field extraction, plausibility bounds)
pub mod decoder;
/// Sensor metadata (model, modulation, timing, output fields)
pub mod device;
/// Frame synthesis for tests and tooling
pub mod encoder;
/// Core data structures (RawFrame, Reading)
pub mod models;
/// Downstream output record
pub mod output;
/// Outcome counters
pub mod stats;
/// Helpers shared by the command-line tools
pub mod tools;

pub use decoder::{Diagnostics, FailureReason, FrameDecoder, LogDiagnostics};
pub use models::{FrameError, RawFrame, Reading};
pub use stats::DecodeStats;

use rayon::prelude::*;
use thiserror::Error;

/// Failure of a convenience entry point that also checks the frame length
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Input was not a 42-bit frame
    #[error(transparent)]
    Frame(#[from] FrameError),
    /// Frame was discarded by the decoder
    #[error(transparent)]
    Rejected(#[from] FailureReason),
}

/// Decode a frame from raw bytes (must be exactly 6 bytes)
pub fn decode(bytes: &[u8]) -> Result<Reading, DecodeError> {
    let frame = RawFrame::from_slice(bytes)?;
    Ok(FrameDecoder::decode(&frame)?)
}

/// Decode a frame given as a hex dump, e.g. `0e 20 cd 80 0c 40`
pub fn decode_hex(hex: &str) -> Result<Reading, DecodeError> {
    let frame = RawFrame::from_hex(hex)?;
    Ok(FrameDecoder::decode(&frame)?)
}

/// Decode an already length-checked frame
pub fn decode_frame(frame: &RawFrame) -> Result<Reading, FailureReason> {
    FrameDecoder::decode(frame)
}

/// Decode many independent frames, in input order
///
/// Batches of at least `TH_PARALLEL_MIN_FRAMES` frames (default 64) are
/// spread over the rayon thread pool.
pub fn decode_batch(frames: &[RawFrame]) -> Vec<Result<Reading, FailureReason>> {
    if frames.len() >= decoder::config::parallel_min_frames() {
        decode_batch_parallel(frames)
    } else {
        decode_batch_sequential(frames)
    }
}

/// Decode many frames on the calling thread
pub fn decode_batch_sequential(frames: &[RawFrame]) -> Vec<Result<Reading, FailureReason>> {
    frames.iter().map(FrameDecoder::decode).collect()
}

/// Decode many frames on the rayon thread pool
pub fn decode_batch_parallel(frames: &[RawFrame]) -> Vec<Result<Reading, FailureReason>> {
    frames.par_iter().map(FrameDecoder::decode).collect()
}

/// Reusable decoder that keeps outcome counters and an optional diagnostics sink
///
/// The counters live here, not in [`FrameDecoder`]; every decode is still an
/// independent pure call.
pub struct Decoder {
    stats: DecodeStats,
    diagnostics: Option<Box<dyn Diagnostics + Send>>,
}

impl Decoder {
    /// Create a decoder without diagnostics
    pub fn new() -> Self {
        Self {
            stats: DecodeStats::default(),
            diagnostics: None,
        }
    }

    /// Create a decoder that reports every stage to `diagnostics`
    pub fn with_diagnostics(diagnostics: Box<dyn Diagnostics + Send>) -> Self {
        Self {
            stats: DecodeStats::default(),
            diagnostics: Some(diagnostics),
        }
    }

    /// Create a decoder logging through `log` at the given verbosity
    pub fn with_logging(verbosity: u8) -> Self {
        Self::with_diagnostics(Box::new(LogDiagnostics::new(verbosity)))
    }

    /// Decode one frame and count the outcome
    pub fn decode(&mut self, frame: &RawFrame) -> Result<Reading, FailureReason> {
        let result = match self.diagnostics.as_deref_mut() {
            Some(diagnostics) => FrameDecoder::decode_with(frame, diagnostics),
            None => FrameDecoder::decode(frame),
        };
        self.stats.record(&result);
        result
    }

    /// Decode a batch and count every outcome
    ///
    /// Without a diagnostics sink the batch goes through [`decode_batch`];
    /// with one, frames are decoded in order on the calling thread.
    pub fn decode_batch(&mut self, frames: &[RawFrame]) -> Vec<Result<Reading, FailureReason>> {
        if self.diagnostics.is_some() {
            return frames.iter().map(|frame| self.decode(frame)).collect();
        }
        let results = decode_batch(frames);
        self.stats.merge(&DecodeStats::from_results(&results));
        results
    }

    /// Counters since creation or the last reset
    pub fn stats(&self) -> &DecodeStats {
        &self.stats
    }

    /// Zero the counters
    pub fn reset_stats(&mut self) {
        self.stats = DecodeStats::default();
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::RecordingDiagnostics;
    use crate::encoder::FrameBuilder;

    const SAMPLE: [u8; 6] = [0x0e, 0x20, 0xcd, 0x80, 0x0c, 0x40];

    #[test]
    fn test_decode_bytes() {
        let reading = decode(&SAMPLE).unwrap();
        assert_eq!(reading.channel, 3);
        assert_eq!(
            decode(&SAMPLE[..4]),
            Err(DecodeError::Frame(FrameError::ByteLength(4)))
        );
        assert_eq!(
            decode(&[0, 0, 0, 0, 0, 0]),
            Err(DecodeError::Rejected(FailureReason::AllZero))
        );
    }

    #[test]
    fn test_decode_hex() {
        assert_eq!(decode_hex("0e 20 cd 80 0c 40"), decode(&SAMPLE));
        assert!(matches!(
            decode_hex("{41}0e20cd800c4"),
            Err(DecodeError::Frame(FrameError::BitLength(41)))
        ));
    }

    #[test]
    fn test_batch_modes_agree() {
        let frames: Vec<RawFrame> = (0..200u16)
            .map(|i| {
                let frame = FrameBuilder::new(i as u8)
                    .channel((i % 4) as u8 + 1)
                    .temperature_tenths(i as i16 * 13 - 600)
                    .humidity((i % 120) as u8)
                    .build();
                // corrupt every seventh frame
                if i % 7 == 0 { frame.with_bit_flipped(20) } else { frame }
            })
            .collect();

        let sequential = decode_batch_sequential(&frames);
        let parallel = decode_batch_parallel(&frames);
        assert_eq!(sequential, parallel);
        assert_eq!(decode_batch(&frames), sequential);
        assert_eq!(sequential[5], decode_frame(&frames[5]));
    }

    #[test]
    fn test_decoder_counts() {
        let mut decoder = Decoder::new();
        let good = RawFrame::new(SAMPLE);
        let bad = good.with_bit_flipped(3);
        assert!(decoder.decode(&good).is_ok());
        assert!(decoder.decode(&bad).is_err());
        decoder.decode_batch(&[good, good, RawFrame::default()]);

        let stats = decoder.stats();
        assert_eq!(stats.decoded, 3);
        assert_eq!(stats.checksum_mismatch, 1);
        assert_eq!(stats.all_zero, 1);

        decoder.reset_stats();
        assert_eq!(decoder.stats().total(), 0);
    }

    #[test]
    fn test_decoder_with_diagnostics() {
        let mut decoder = Decoder::with_diagnostics(Box::new(RecordingDiagnostics::default()));
        let results = decoder.decode_batch(&[RawFrame::new(SAMPLE), RawFrame::default()]);
        assert!(results[0].is_ok());
        assert_eq!(results[1], Err(FailureReason::AllZero));
        assert_eq!(decoder.stats().total(), 2);

        let mut logging = Decoder::with_logging(2);
        assert!(logging.decode(&RawFrame::new(SAMPLE)).is_ok());
    }
}
