//! Voltage conversion and formatting

use core::fmt::{self, Write};

use heapless::String;

use crate::config::FrontEndConfig;

/// Microvolts per tenth of a volt
const UV_PER_TENTH: u32 = 100_000;

/// Longest formatted reading: "4295.0 V"
pub const VOLTAGE_TEXT_LEN: usize = 10;

/// Convert an ADC count (or count difference) to microvolts
///
/// Uses the truncated per-step factor of the front end, so
/// `adc_to_microvolts(adc_max)` lands just under full scale.
pub fn adc_to_microvolts(counts: u16, front_end: &FrontEndConfig) -> u32 {
    front_end.uv_per_step().saturating_mul(counts as u32)
}

/// Voltage across the component
///
/// Kept at µV resolution. Comparisons use truncated tenths of a volt,
/// display rounds to the nearest tenth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VoltageReading {
    microvolts: u32,
}

impl VoltageReading {
    /// Create from microvolts
    pub const fn from_microvolts(microvolts: u32) -> Self {
        Self { microvolts }
    }

    /// Scale a magnitude in ADC counts
    pub fn from_counts(counts: u16, front_end: &FrontEndConfig) -> Self {
        Self::from_microvolts(adc_to_microvolts(counts, front_end))
    }

    /// Full-precision value
    pub const fn microvolts(self) -> u32 {
        self.microvolts
    }

    /// Truncated tenths of a volt (threshold comparisons)
    pub const fn tenths(self) -> u32 {
        self.microvolts / UV_PER_TENTH
    }

    /// Tenths of a volt rounded half-up (display)
    pub const fn rounded_tenths(self) -> u32 {
        // u64 keeps the +half from overflowing near u32::MAX
        ((self.microvolts as u64 + (UV_PER_TENTH as u64 / 2)) / UV_PER_TENTH as u64) as u32
    }

    /// Render as "12.3 V" into a fixed buffer
    pub fn to_text(self) -> String<VOLTAGE_TEXT_LEN> {
        let mut text = String::new();
        // Capacity covers the widest u32 reading
        let _ = write!(text, "{}", self);
        text
    }
}

impl fmt::Display for VoltageReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tenths = self.rounded_tenths();
        write!(f, "{}.{} V", tenths / 10, tenths % 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adc_to_microvolts_endpoints() {
        let fe = FrontEndConfig::reference();
        assert_eq!(adc_to_microvolts(0, &fe), 0);

        // 29325 * 1023 = 29_999_475 µV, within 1 mV of 30 V
        let full = adc_to_microvolts(1023, &fe);
        assert_eq!(full, 29_999_475);
        assert!(30_000_000 - full < 1_000);
    }

    #[test]
    fn test_tenths_truncate() {
        let v = VoltageReading::from_microvolts(27_999_999);
        assert_eq!(v.tenths(), 279);
        assert_eq!(v.rounded_tenths(), 280);
    }

    #[test]
    fn test_display_rounds() {
        let fe = FrontEndConfig::reference();
        // 200 counts = 5.865 V
        assert_eq!(VoltageReading::from_counts(200, &fe).to_text().as_str(), "5.9 V");
        // 1000 counts = 29.325 V
        assert_eq!(VoltageReading::from_counts(1000, &fe).to_text().as_str(), "29.3 V");
        // 900 counts = 26.3925 V
        assert_eq!(VoltageReading::from_counts(900, &fe).to_text().as_str(), "26.4 V");
        assert_eq!(VoltageReading::from_microvolts(0).to_text().as_str(), "0.0 V");
    }

    #[test]
    fn test_display_widest_value_fits() {
        let text = VoltageReading::from_microvolts(u32::MAX).to_text();
        assert_eq!(text.as_str(), "4295.0 V");
    }
}
