/// Validated measurement decoded from one frame
///
/// Only the frame decoder constructs this, and only after the checksum and
/// both plausibility bounds have passed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Random device code, regenerated on battery change
    pub id: u8,
    /// Channel selector position (1-4)
    pub channel: u8,
    /// Temperature in tenths of a degree Celsius
    pub temperature_tenths: i16,
    /// Temperature in degrees Celsius (0.1 °C resolution)
    pub temperature_c: f32,
    /// Relative humidity in percent (0-100)
    pub humidity_pct: u8,
    /// Battery voltage below 2.6 V
    pub battery_low: bool,
    /// Always true for a decoded reading
    pub checksum_valid: bool,
}

impl Reading {
    /// Battery status as reported downstream
    pub fn battery_status(&self) -> &'static str {
        if self.battery_low { "LOW" } else { "OK" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battery_status() {
        let mut reading = Reading {
            id: 14,
            channel: 3,
            temperature_tenths: 205,
            temperature_c: 20.5,
            humidity_pct: 64,
            battery_low: false,
            checksum_valid: true,
        };
        assert_eq!(reading.battery_status(), "OK");
        reading.battery_low = true;
        assert_eq!(reading.battery_status(), "LOW");
    }
}
