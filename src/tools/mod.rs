use crate::decoder::{FailureReason, FrameDecoder};
use crate::models::{FRAME_BITS, FrameError, RawFrame, Reading};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// One non-comment line of a frame file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLine {
    /// 1-based line number in the source
    pub line_no: usize,
    /// Parsed frame or the reason it could not be parsed
    pub frame: Result<RawFrame, FrameError>,
}

/// Parse a frame listing: one hex frame per line, `#` starts a comment.
///
/// A leading `[NN]` row marker (as printed by radio capture tools) is skipped,
/// so `[01] {42} 0e 20 cd 80 0c 40` parses as well.
pub fn parse_frame_lines(content: &str) -> Vec<FrameLine> {
    let mut frames = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let line = strip_row_marker(line);
        // Tools often append a binary rendering after a colon
        let line = line.split(':').next().unwrap_or(line);
        frames.push(FrameLine {
            line_no: idx + 1,
            frame: RawFrame::from_hex(line),
        });
    }
    frames
}

fn strip_row_marker(line: &str) -> &str {
    if let Some(rest) = line.strip_prefix('[') {
        if let Some((marker, rest)) = rest.split_once(']') {
            if marker.trim().chars().all(|c| c.is_ascii_digit()) {
                return rest.trim_start();
            }
        }
    }
    line
}

/// Read and parse a frame file
pub fn read_frames<P: AsRef<Path>>(path: P) -> Result<Vec<FrameLine>, std::io::Error> {
    let content = fs::read_to_string(path)?;
    Ok(parse_frame_lines(&content))
}

/// Default frame file from `TH_FRAMES_FILE`
pub fn frames_path_from_env() -> PathBuf {
    env::var("TH_FRAMES_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("frames.txt"))
}

/// Outcome of flipping every meaningful bit of a frame once
#[derive(Debug, Clone, PartialEq)]
pub struct SweepReport {
    /// Frame that was swept
    pub frame: RawFrame,
    /// Decode result of the unmodified frame
    pub baseline: Result<Reading, FailureReason>,
    /// Number of single-bit variants tried
    pub flips: usize,
    /// Variants rejected by the checksum
    pub checksum_mismatch: usize,
    /// Variants that collapsed to an all-zero payload
    pub all_zero: usize,
    /// Variants that got past the checksum, with the bit index and outcome
    pub exceptions: Vec<(usize, Result<Reading, FailureReason>)>,
}

impl SweepReport {
    /// Share of flips rejected before field extraction
    pub fn detection_rate(&self) -> f64 {
        if self.flips == 0 {
            return 0.0;
        }
        (self.checksum_mismatch + self.all_zero) as f64 / self.flips as f64
    }
}

/// Flip each of the 42 meaningful bits in turn and decode the result
pub fn sweep_single_bit_flips(frame: &RawFrame) -> SweepReport {
    let mut report = SweepReport {
        frame: *frame,
        baseline: FrameDecoder::decode(frame),
        flips: 0,
        checksum_mismatch: 0,
        all_zero: 0,
        exceptions: Vec::new(),
    };

    for bit in 0..FRAME_BITS {
        let flipped = frame.with_bit_flipped(bit);
        report.flips += 1;
        match FrameDecoder::decode(&flipped) {
            Err(FailureReason::ChecksumMismatch { .. }) => report.checksum_mismatch += 1,
            Err(FailureReason::AllZero) => report.all_zero += 1,
            other => report.exceptions.push((bit, other)),
        }
    }

    report
}
