use thiserror::Error;

/// Why a frame was discarded
///
/// Every variant is local and non-fatal; the caller drops the frame and
/// waits for the next transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FailureReason {
    /// Id, channel, temperature and humidity bytes are all zero (no signal)
    #[error("data all 0x00")]
    AllZero,
    /// Nibble sum does not match the transmitted checksum
    #[error("checksum mismatch: computed 0x{computed:02x}, received 0x{received:02x}")]
    ChecksumMismatch {
        /// Checksum computed over the payload
        computed: u8,
        /// Checksum carried by the frame
        received: u8,
    },
    /// Checksum passed but the temperature is implausible
    #[error("invalid temperature: {tenths} (0.1 C)")]
    TemperatureOutOfRange {
        /// Decoded temperature in tenths of a degree
        tenths: i16,
    },
    /// Checksum passed but the humidity is implausible
    #[error("invalid humidity: {humidity} %")]
    HumidityOutOfRange {
        /// Decoded humidity in percent
        humidity: u8,
    },
}

impl FailureReason {
    /// Checksum passed but a decoded value failed a plausibility bound
    pub fn is_sanity_failure(&self) -> bool {
        matches!(
            self,
            FailureReason::TemperatureOutOfRange { .. } | FailureReason::HumidityOutOfRange { .. }
        )
    }

    /// Short stable label, used for statistics and CLI output
    pub fn label(&self) -> &'static str {
        match self {
            FailureReason::AllZero => "all_zero",
            FailureReason::ChecksumMismatch { .. } => "checksum_mismatch",
            FailureReason::TemperatureOutOfRange { .. } => "temperature_out_of_range",
            FailureReason::HumidityOutOfRange { .. } => "humidity_out_of_range",
        }
    }
}
