//! Additive nibble checksum carried in bits 36-41 of every frame
use crate::models::RawFrame;

/// Checksum field width is 6 bits
pub const CHECKSUM_MASK: u8 = 0x3f;

/// Sum of the 9 payload nibbles (bytes 0-3 and the high nibble of byte 4), mod 64
pub fn compute(frame: &RawFrame) -> u8 {
    let bytes = frame.as_bytes();
    let mut sum: u8 = 0;
    for &b in &bytes[..4] {
        sum = sum.wrapping_add(b >> 4).wrapping_add(b & 0x0f);
    }
    sum = sum.wrapping_add(bytes[4] >> 4);
    sum & CHECKSUM_MASK
}

/// Checksum as transmitted: low nibble of byte 4, then the top 2 bits of byte 5
pub fn received(frame: &RawFrame) -> u8 {
    ((frame.byte(4) & 0x0f) << 2) | (frame.byte(5) >> 6)
}

/// Write `checksum` into the trailing 6 bits of the frame
pub(crate) fn store(bytes: &mut [u8; 6], checksum: u8) {
    let checksum = checksum & CHECKSUM_MASK;
    bytes[4] = (bytes[4] & 0xf0) | (checksum >> 2);
    bytes[5] = (bytes[5] & 0x3f) | ((checksum & 0x03) << 6);
}
