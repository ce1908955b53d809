use outdoor_th::RawFrame;
use outdoor_th::encoder::FrameBuilder;

#[allow(dead_code)]
pub const SAMPLE: [u8; 6] = [0x0e, 0x20, 0xcd, 0x80, 0x0c, 0x40];

/// Mixed capture: mostly valid frames, every fifth corrupted, every
/// thirteenth empty
#[allow(dead_code)]
pub fn synthetic_frames(count: usize) -> Vec<RawFrame> {
    (0..count)
        .map(|i| {
            if i % 13 == 0 {
                return RawFrame::default();
            }
            let frame = FrameBuilder::new(i as u8)
                .channel((i % 4) as u8 + 1)
                .temperature_tenths((i % 2400) as i16 - 400)
                .humidity((i % 101) as u8)
                .battery_low(i % 3 == 0)
                .build();
            if i % 5 == 0 {
                frame.with_bit_flipped(i % 42)
            } else {
                frame
            }
        })
        .collect()
}
