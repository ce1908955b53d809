use crate::decoder::FailureReason;
use crate::models::Reading;

/// Outcome counters over a stream of decode attempts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Frames that produced a reading
    pub decoded: usize,
    /// No-signal frames
    pub all_zero: usize,
    /// Checksum failures
    pub checksum_mismatch: usize,
    /// Checksum passed, temperature implausible
    pub temperature_out_of_range: usize,
    /// Checksum passed, humidity implausible
    pub humidity_out_of_range: usize,
}

impl DecodeStats {
    /// Count one outcome
    pub fn record(&mut self, result: &Result<Reading, FailureReason>) {
        match result {
            Ok(_) => self.decoded += 1,
            Err(FailureReason::AllZero) => self.all_zero += 1,
            Err(FailureReason::ChecksumMismatch { .. }) => self.checksum_mismatch += 1,
            Err(FailureReason::TemperatureOutOfRange { .. }) => {
                self.temperature_out_of_range += 1
            }
            Err(FailureReason::HumidityOutOfRange { .. }) => self.humidity_out_of_range += 1,
        }
    }

    /// Count a whole batch
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a Result<Reading, FailureReason>>,
    {
        let mut stats = Self::default();
        for result in results {
            stats.record(result);
        }
        stats
    }

    /// Frames seen
    pub fn total(&self) -> usize {
        self.decoded + self.rejected()
    }

    /// Frames discarded for any reason
    pub fn rejected(&self) -> usize {
        self.all_zero
            + self.checksum_mismatch
            + self.temperature_out_of_range
            + self.humidity_out_of_range
    }

    /// Checksum-valid frames rejected by a plausibility bound
    pub fn sanity_failures(&self) -> usize {
        self.temperature_out_of_range + self.humidity_out_of_range
    }

    /// Decoded share of all frames, 0.0 when nothing was seen
    pub fn success_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.decoded as f64 / total as f64
        }
    }

    /// Add another set of counters
    pub fn merge(&mut self, other: &DecodeStats) {
        self.decoded += other.decoded;
        self.all_zero += other.all_zero;
        self.checksum_mismatch += other.checksum_mismatch;
        self.temperature_out_of_range += other.temperature_out_of_range;
        self.humidity_out_of_range += other.humidity_out_of_range;
    }
}
