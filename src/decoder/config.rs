use crate::device::{DEFAULT_MIN_REPEATS, DEFAULT_TIMING, PulseTiming};
use std::sync::OnceLock;

fn parse_u32(value: Option<String>, default: u32) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

fn parse_usize(value: Option<String>, default: usize) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_u8(value: Option<String>, default: u8) -> u8 {
    value
        .and_then(|v| v.trim().parse::<u8>().ok())
        .unwrap_or(default)
}

fn parse_width(value: Option<String>, default: u32) -> u32 {
    parse_u32(value, default).max(1)
}

fn env_width(name: &str, default: u32) -> u32 {
    parse_width(std::env::var(name).ok(), default)
}

static VERBOSITY: OnceLock<u8> = OnceLock::new();

/// Diagnostic verbosity (`TH_VERBOSE`); traces are emitted above 1
pub fn verbosity() -> u8 {
    *VERBOSITY.get_or_init(|| parse_u8(std::env::var("TH_VERBOSE").ok(), 0))
}

/// Requested verbosity raised to at least the `TH_VERBOSE` level
pub fn effective_verbosity(requested: u8) -> u8 {
    requested.max(verbosity())
}

static PARALLEL_MIN_FRAMES: OnceLock<usize> = OnceLock::new();

/// Smallest batch that `decode_batch` hands to rayon
pub fn parallel_min_frames() -> usize {
    *PARALLEL_MIN_FRAMES.get_or_init(|| {
        parse_usize(std::env::var("TH_PARALLEL_MIN_FRAMES").ok(), 64).max(1)
    })
}

static MIN_REPEATS: OnceLock<u8> = OnceLock::new();

/// Repeats the acquisition layer must see before handing over a frame
pub fn min_repeats() -> u8 {
    *MIN_REPEATS.get_or_init(|| {
        parse_u8(std::env::var("TH_MIN_REPEATS").ok(), DEFAULT_MIN_REPEATS).clamp(1, 6)
    })
}

static PULSE_TIMING: OnceLock<PulseTiming> = OnceLock::new();

/// Pulse timing with `TH_SHORT_WIDTH`, `TH_LONG_WIDTH`, `TH_GAP_LIMIT` and
/// `TH_RESET_LIMIT` overrides applied; every width is at least 1 us
pub fn pulse_timing() -> PulseTiming {
    *PULSE_TIMING.get_or_init(|| PulseTiming {
        short_width: env_width("TH_SHORT_WIDTH", DEFAULT_TIMING.short_width),
        long_width: env_width("TH_LONG_WIDTH", DEFAULT_TIMING.long_width),
        gap_limit: env_width("TH_GAP_LIMIT", DEFAULT_TIMING.gap_limit),
        reset_limit: env_width("TH_RESET_LIMIT", DEFAULT_TIMING.reset_limit),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_u32(Some(" 2500 ".to_string()), 2000), 2500);
        assert_eq!(parse_u32(Some("fast".to_string()), 2000), 2000);
        assert_eq!(parse_u32(None, 2000), 2000);

        assert_eq!(parse_usize(Some("128".to_string()), 64), 128);
        assert_eq!(parse_usize(Some("-1".to_string()), 64), 64);

        assert_eq!(parse_u8(Some("3".to_string()), 0), 3);
        assert_eq!(parse_u8(Some("300".to_string()), 0), 0);
    }

    #[test]
    fn test_width_override_has_floor() {
        assert_eq!(parse_width(Some("0".to_string()), 2000), 1);
        assert_eq!(parse_width(Some("1500".to_string()), 2000), 1500);
        assert_eq!(parse_width(Some("wide".to_string()), 2000), 2000);
    }

    #[test]
    fn test_effective_verbosity() {
        assert_eq!(effective_verbosity(0), verbosity());
        assert_eq!(effective_verbosity(u8::MAX), u8::MAX);
        assert!(effective_verbosity(2) >= 2);
    }

    #[test]
    fn test_accessors_stay_in_range() {
        assert!(parallel_min_frames() >= 1);
        assert!((1..=6).contains(&min_repeats()));
        let timing = pulse_timing();
        assert!(timing.short_width >= 1);
        assert!(timing.long_width >= 1);
        assert!(timing.gap_limit >= 1);
        assert!(timing.reset_limit >= 1);
    }
}
