/// Raw 42-bit frame and its parse errors
pub mod frame;
/// Decoded reading
pub mod reading;

pub use frame::{FRAME_BITS, FRAME_BYTES, FrameError, RawFrame};
pub use reading::Reading;
