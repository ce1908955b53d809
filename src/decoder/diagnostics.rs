//! Diagnostic side channel for the frame decoder
//!
//! The decoder reports what it sees to a [`Diagnostics`] sink without letting
//! the sink influence the result. [`NoDiagnostics`] discards everything;
//! [`LogDiagnostics`] forwards to the `log` facade at debug level once
//! verbosity exceeds 1 (sanity failures at warn).

use crate::decoder::failure::FailureReason;
use crate::models::{RawFrame, Reading};
use log::{debug, warn};

const LOG_TARGET: &str = "outdoor_th::decoder";

/// Observer for decode stages
pub trait Diagnostics {
    /// Frame passed the all-zero check and is about to be checksummed
    fn frame_received(&mut self, _frame: &RawFrame) {}

    /// Both checksums are known
    fn checksum_computed(&mut self, _computed: u8, _received: u8) {}

    /// Frame was discarded
    fn frame_rejected(&mut self, _frame: &RawFrame, _reason: &FailureReason) {}

    /// Frame decoded into a reading
    fn frame_decoded(&mut self, _frame: &RawFrame, _reading: &Reading) {}
}

/// Sink that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiagnostics;

impl Diagnostics for NoDiagnostics {}

/// Sink that writes decode traces through `log`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogDiagnostics {
    verbosity: u8,
}

impl LogDiagnostics {
    /// Create a sink; nothing is emitted unless `verbosity > 1`
    pub fn new(verbosity: u8) -> Self {
        Self { verbosity }
    }

    /// Sink using the `TH_VERBOSE` level
    pub fn from_env() -> Self {
        Self::new(crate::decoder::config::verbosity())
    }

    /// Current verbosity level
    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }

    fn enabled(&self) -> bool {
        self.verbosity > 1
    }
}

impl Default for LogDiagnostics {
    fn default() -> Self {
        Self::from_env()
    }
}

impl Diagnostics for LogDiagnostics {
    fn frame_received(&mut self, frame: &RawFrame) {
        if self.enabled() {
            debug!(target: LOG_TARGET, "hex input: {} | {}", frame, frame.to_hex());
        }
    }

    fn checksum_computed(&mut self, computed: u8, received: u8) {
        if self.enabled() {
            debug!(
                target: LOG_TARGET,
                "checksum: 0x{:02x}, checksum_recv: 0x{:02x}",
                computed,
                received
            );
        }
    }

    fn frame_rejected(&mut self, frame: &RawFrame, reason: &FailureReason) {
        if !self.enabled() {
            return;
        }
        // Checksum-valid but implausible frames stay on a separate level from noise
        if reason.is_sanity_failure() {
            warn!(target: LOG_TARGET, "sanity check failed for [{}]: {}", frame, reason);
        } else {
            debug!(target: LOG_TARGET, "frame [{}] rejected: {}", frame, reason);
        }
    }

    fn frame_decoded(&mut self, frame: &RawFrame, reading: &Reading) {
        if self.enabled() {
            debug!(
                target: LOG_TARGET,
                "frame [{}] -> id={} channel={} temperature={:.1} humidity={}",
                frame,
                reading.id,
                reading.channel,
                reading.temperature_c,
                reading.humidity_pct
            );
        }
    }
}

/// Sink that records events in memory, for inspecting the decoder in tests
#[derive(Debug, Clone, Default)]
pub struct RecordingDiagnostics {
    /// Frames that reached the checksum stage
    pub received: Vec<RawFrame>,
    /// (computed, received) checksum pairs
    pub checksums: Vec<(u8, u8)>,
    /// Rejections in order
    pub rejections: Vec<FailureReason>,
    /// Number of successful decodes
    pub decoded: usize,
}

impl Diagnostics for RecordingDiagnostics {
    fn frame_received(&mut self, frame: &RawFrame) {
        self.received.push(*frame);
    }

    fn checksum_computed(&mut self, computed: u8, received: u8) {
        self.checksums.push((computed, received));
    }

    fn frame_rejected(&mut self, _frame: &RawFrame, reason: &FailureReason) {
        self.rejections.push(*reason);
    }

    fn frame_decoded(&mut self, _frame: &RawFrame, _reading: &Reading) {
        self.decoded += 1;
    }
}
