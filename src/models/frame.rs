use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of meaningful bits in one transmission
pub const FRAME_BITS: usize = 42;
/// Bytes allocated for one frame (the last 6 bits are padding)
pub const FRAME_BYTES: usize = 6;

/// Rejection raised at the acquisition boundary, before decoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Byte buffer is not exactly [`FRAME_BYTES`] long
    #[error("expected 6 bytes, got {0}")]
    ByteLength(usize),
    /// Bit row is not exactly [`FRAME_BITS`] long
    #[error("expected a 42-bit row, got {0} bits")]
    BitLength(usize),
    /// Hex dump could not be parsed
    #[error("invalid hex frame {input:?}: {reason}")]
    InvalidHex {
        /// Offending input, trimmed
        input: String,
        /// What went wrong
        reason: String,
    },
}

/// One 42-bit sensor transmission packed MSB-first into 6 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RawFrame {
    bytes: [u8; FRAME_BYTES],
}

impl RawFrame {
    /// Wrap 6 raw bytes
    pub const fn new(bytes: [u8; FRAME_BYTES]) -> Self {
        Self { bytes }
    }

    /// Build a frame from a byte slice, rejecting any other length
    pub fn from_slice(bytes: &[u8]) -> Result<Self, FrameError> {
        let bytes: [u8; FRAME_BYTES] = bytes
            .try_into()
            .map_err(|_| FrameError::ByteLength(bytes.len()))?;
        Ok(Self { bytes })
    }

    /// Pack a demodulated bit row (one bool per bit, MSB first)
    pub fn from_bits(bits: &[bool]) -> Result<Self, FrameError> {
        if bits.len() != FRAME_BITS {
            return Err(FrameError::BitLength(bits.len()));
        }
        let mut frame = Self::default();
        for (index, &bit) in bits.iter().enumerate() {
            frame.set_bit(index, bit);
        }
        Ok(frame)
    }

    /// Parse a hex dump such as `0e 20 cd 80 0c 40` or `{42}0e20cd800c4`.
    ///
    /// Whitespace is ignored. An optional `{N}` bit-count prefix must say 42.
    /// Eleven nibbles (44 bits) are accepted and padded with a zero nibble.
    pub fn from_hex(input: &str) -> Result<Self, FrameError> {
        let trimmed = input.trim();
        let invalid = |reason: String| FrameError::InvalidHex {
            input: trimmed.to_string(),
            reason,
        };

        let mut body = trimmed;
        if let Some(rest) = body.strip_prefix('{') {
            let (count, rest) = rest
                .split_once('}')
                .ok_or_else(|| invalid("unterminated bit count".to_string()))?;
            let count = count
                .trim()
                .parse::<usize>()
                .map_err(|_| invalid(format!("bad bit count {count:?}")))?;
            if count != FRAME_BITS {
                return Err(FrameError::BitLength(count));
            }
            body = rest;
        }

        let mut digits: String = body
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        match digits.len() {
            11 => digits.push('0'),
            12 => {}
            n => return Err(invalid(format!("expected 11 or 12 hex digits, got {n}"))),
        }

        let decoded = hex::decode(&digits).map_err(|e| invalid(e.to_string()))?;
        Self::from_slice(&decoded)
    }

    /// Raw bytes, including padding
    pub fn as_bytes(&self) -> &[u8; FRAME_BYTES] {
        &self.bytes
    }

    /// Byte at `index` (0..6)
    pub fn byte(&self, index: usize) -> u8 {
        self.bytes[index]
    }

    /// Get bit `index`, counting MSB-first from the start of the frame
    pub fn bit(&self, index: usize) -> bool {
        if index >= FRAME_BITS {
            return false;
        }
        (self.bytes[index / 8] >> (7 - index % 8)) & 1 == 1
    }

    /// Set bit `index`
    pub fn set_bit(&mut self, index: usize, value: bool) {
        if index >= FRAME_BITS {
            return;
        }
        let mask = 1 << (7 - index % 8);
        if value {
            self.bytes[index / 8] |= mask;
        } else {
            self.bytes[index / 8] &= !mask;
        }
    }

    /// Copy of this frame with bit `index` inverted
    pub fn with_bit_flipped(&self, index: usize) -> Self {
        let mut flipped = *self;
        if index < FRAME_BITS {
            flipped.bytes[index / 8] ^= 1 << (7 - index % 8);
        }
        flipped
    }

    /// Lowercase hex, no separators
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl From<[u8; FRAME_BYTES]> for RawFrame {
    fn from(bytes: [u8; FRAME_BYTES]) -> Self {
        Self::new(bytes)
    }
}

impl FromStr for RawFrame {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for RawFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [b0, b1, b2, b3, b4, b5] = self.bytes;
        write!(f, "{b0:02x} {b1:02x} {b2:02x} {b3:02x} {b4:02x} {b5:02x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: [u8; 6] = [0x0e, 0x20, 0xcd, 0x80, 0x0c, 0x40];

    #[test]
    fn test_from_slice_length() {
        assert!(RawFrame::from_slice(&SAMPLE).is_ok());
        assert_eq!(
            RawFrame::from_slice(&SAMPLE[..5]),
            Err(FrameError::ByteLength(5))
        );
        assert_eq!(
            RawFrame::from_slice(&[0u8; 7]),
            Err(FrameError::ByteLength(7))
        );
    }

    #[test]
    fn test_from_bits() {
        let frame = RawFrame::new(SAMPLE);
        let bits: Vec<bool> = (0..FRAME_BITS).map(|i| frame.bit(i)).collect();
        assert_eq!(RawFrame::from_bits(&bits), Ok(frame));

        assert_eq!(
            RawFrame::from_bits(&bits[..41]),
            Err(FrameError::BitLength(41))
        );
    }

    #[test]
    fn test_from_hex_formats() {
        let expected = RawFrame::new(SAMPLE);
        assert_eq!(RawFrame::from_hex("0e 20 cd 80 0c 40"), Ok(expected));
        assert_eq!(RawFrame::from_hex("0e20cd800c40"), Ok(expected));
        assert_eq!(RawFrame::from_hex("{42}0e20cd800c4"), Ok(expected));
        assert_eq!("  0E20CD800C40 ".parse::<RawFrame>(), Ok(expected));
    }

    #[test]
    fn test_from_hex_errors() {
        assert_eq!(
            RawFrame::from_hex("{40}0e20cd800c4"),
            Err(FrameError::BitLength(40))
        );
        assert!(matches!(
            RawFrame::from_hex("0e20cd80"),
            Err(FrameError::InvalidHex { .. })
        ));
        assert!(matches!(
            RawFrame::from_hex("zz20cd800c40"),
            Err(FrameError::InvalidHex { .. })
        ));
        assert!(matches!(
            RawFrame::from_hex("{42 0e20cd800c4"),
            Err(FrameError::InvalidHex { .. })
        ));
    }

    #[test]
    fn test_bit_access() {
        let mut frame = RawFrame::new(SAMPLE);
        // 0x0e = 0000_1110
        assert!(!frame.bit(3));
        assert!(frame.bit(4));
        // byte 5 top bits: 01
        assert!(!frame.bit(40));
        assert!(frame.bit(41));
        // padding is never addressed
        assert!(!frame.bit(42));

        frame.set_bit(0, true);
        assert_eq!(frame.byte(0), 0x8e);
        frame.set_bit(45, true);
        assert_eq!(frame.byte(5), 0x40);

        let flipped = frame.with_bit_flipped(41);
        assert_eq!(flipped.byte(5), 0x00);
        assert_eq!(frame.with_bit_flipped(47), frame);
    }

    #[test]
    fn test_display() {
        let frame = RawFrame::new(SAMPLE);
        assert_eq!(frame.to_string(), "0e 20 cd 80 0c 40");
        assert_eq!(frame.to_hex(), "0e20cd800c40");
    }
}
