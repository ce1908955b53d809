//! Frame decoding modules
//!
//! This module contains all the logic for turning a repeat-confirmed 42-bit
//! frame into a validated reading:
//! - All-zero (no signal) rejection
//! - Additive nibble checksum verification
//! - Fixed-offset field extraction
//! - Plausibility bounds on temperature and humidity

/// Nibble-sum checksum over the payload
pub mod checksum;
/// Environment overrides
pub mod config;
/// Diagnostic side channel (no-op, `log`, in-memory)
pub mod diagnostics;
/// Failure taxonomy
pub mod failure;
/// Field extraction at fixed bit offsets
pub mod fields;
/// Stateless decoder that runs the validation stages
pub mod frame_decoder;

pub use diagnostics::{Diagnostics, LogDiagnostics, NoDiagnostics, RecordingDiagnostics};
pub use failure::FailureReason;
pub use frame_decoder::FrameDecoder;
