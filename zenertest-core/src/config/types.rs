//! Configuration type definitions
//!
//! All values are integers in explicit units (µV, tenths of a volt, ms, µs)
//! so the measurement path stays free of floating point.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// ADC full-scale count is zero
    ZeroAdcMax,
    /// Full-scale voltage is zero, or smaller than one µV per step
    FullScaleTooSmall,
    /// Short threshold must be strictly below the open threshold
    ThresholdOrder,
    /// Conversion poll limit is zero (every sample would time out)
    ZeroPollLimit,
    /// Button poll interval is zero
    ZeroPollInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroAdcMax => write!(f, "adc_max must be non-zero"),
            ConfigError::FullScaleTooSmall => {
                write!(f, "full_scale_uv must be at least adc_max")
            }
            ConfigError::ThresholdOrder => write!(f, "short_dv must be below open_dv"),
            ConfigError::ZeroPollLimit => write!(f, "conversion_poll_limit must be non-zero"),
            ConfigError::ZeroPollInterval => write!(f, "poll_interval_ms must be non-zero"),
        }
    }
}

/// Analog front end calibration
///
/// The probe voltage reaches the ADC through a divider; `full_scale_uv` is
/// the probe voltage that produces a reading of `adc_max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FrontEndConfig {
    /// Probe voltage at full-scale reading (µV)
    pub full_scale_uv: u32,
    /// Highest ADC count (1023 for 10-bit, 4095 for 12-bit)
    pub adc_max: u16,
}

impl FrontEndConfig {
    /// Reference front end: 30.0 V over a 10-bit converter
    pub const fn reference() -> Self {
        Self {
            full_scale_uv: 30_000_000,
            adc_max: 1023,
        }
    }

    /// Microvolts represented by one ADC step
    ///
    /// Integer division happens before any scaling, so the product
    /// `uv_per_step() * adc_max` falls slightly short of full scale.
    pub const fn uv_per_step(&self) -> u32 {
        if self.adc_max == 0 {
            0
        } else {
            self.full_scale_uv / self.adc_max as u32
        }
    }
}

impl Default for FrontEndConfig {
    fn default() -> Self {
        Self::reference()
    }
}

/// Classification thresholds in tenths of a volt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ThresholdConfig {
    /// At or above this in both directions nothing bridges the probes
    pub open_dv: u16,
    /// At or below this in both directions the probes are shorted
    pub short_dv: u16,
}

impl ThresholdConfig {
    /// Reference thresholds: open 28.0 V, short 2.0 V
    pub const fn reference() -> Self {
        Self {
            open_dv: 280,
            short_dv: 20,
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self::reference()
    }
}

/// Timing of one dual-polarity scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScanTiming {
    /// Wait after driving an excitation line, for the output capacitor (ms)
    pub settle_ms: u32,
    /// Wait after each terminal conversion, for the input mux (µs)
    pub inter_sample_us: u32,
    /// Wait between channel select and conversion start (ms)
    pub acquisition_ms: u32,
    /// Smoothing passes after the seed sample (51 conversions at 50)
    pub smoothing_passes: u8,
    /// Interval between conversion completion polls (µs)
    pub conversion_poll_us: u32,
    /// Polls before a conversion is declared timed out
    pub conversion_poll_limit: u32,
}

impl ScanTiming {
    /// Reference timing
    pub const fn reference() -> Self {
        Self {
            settle_ms: 120,
            inter_sample_us: 50,
            acquisition_ms: 2,
            smoothing_passes: 50,
            conversion_poll_us: 10,
            conversion_poll_limit: 100,
        }
    }
}

impl Default for ScanTiming {
    fn default() -> Self {
        Self::reference()
    }
}

/// User-facing timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UiTiming {
    /// Boot wait for the excitation step-up converter to stabilise (ms)
    pub startup_ms: u32,
    /// Button poll cadence (ms)
    pub poll_interval_ms: u32,
}

impl UiTiming {
    /// Reference timing
    pub const fn reference() -> Self {
        Self {
            startup_ms: 1500,
            poll_interval_ms: 100,
        }
    }
}

impl Default for UiTiming {
    fn default() -> Self {
        Self::reference()
    }
}

/// Complete tester configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TesterConfig {
    pub front_end: FrontEndConfig,
    pub thresholds: ThresholdConfig,
    pub scan: ScanTiming,
    pub ui: UiTiming,
}

impl TesterConfig {
    /// Reference configuration: 30 V full scale over a 10-bit converter
    pub const fn reference() -> Self {
        Self {
            front_end: FrontEndConfig::reference(),
            thresholds: ThresholdConfig::reference(),
            scan: ScanTiming::reference(),
            ui: UiTiming::reference(),
        }
    }

    /// Check the configuration for values the measurement path cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.front_end.adc_max == 0 {
            return Err(ConfigError::ZeroAdcMax);
        }
        if self.front_end.uv_per_step() == 0 {
            return Err(ConfigError::FullScaleTooSmall);
        }
        if self.thresholds.short_dv >= self.thresholds.open_dv {
            return Err(ConfigError::ThresholdOrder);
        }
        if self.scan.conversion_poll_limit == 0 {
            return Err(ConfigError::ZeroPollLimit);
        }
        if self.ui.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }
}
