//! Component classifier
//!
//! Maps the forward and reverse magnitudes to what is bridging the probes.
//! Rules, in precedence order (earlier wins on tie):
//!
//! 1. Both directions at or above the open threshold: nothing connected
//! 2. Both directions at or below the short threshold: direct short
//! 3. The larger direction is active; at or above the open threshold the
//!    component is a plain diode
//! 4. Otherwise a zener, reporting the active voltage
//!
//! A leaky diode reading near-open in both directions is reported as open.

use super::scanner::DirectionalMagnitudes;
use super::VoltageReading;
use crate::config::{FrontEndConfig, ThresholdConfig};
use crate::traits::Polarity;

/// Polarity in which conduction or breakdown was observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    /// The other direction
    pub const fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

impl From<Polarity> for Direction {
    fn from(polarity: Polarity) -> Self {
        match polarity {
            Polarity::Forward => Direction::Forward,
            Polarity::Reverse => Direction::Reverse,
        }
    }
}

/// What is bridging the probes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Classification {
    /// No component
    Open,
    /// Direct short
    Short,
    /// Standard diode
    Diode {
        direction: Direction,
        voltage: VoltageReading,
    },
    /// Zener diode, `voltage` is the breakdown voltage
    Zener {
        direction: Direction,
        voltage: VoltageReading,
    },
}

impl Classification {
    /// Orientation, for diodes and zeners
    pub const fn direction(&self) -> Option<Direction> {
        match self {
            Classification::Diode { direction, .. } | Classification::Zener { direction, .. } => {
                Some(*direction)
            }
            _ => None,
        }
    }

    /// Reported voltage, for diodes and zeners
    pub const fn voltage(&self) -> Option<VoltageReading> {
        match self {
            Classification::Diode { voltage, .. } | Classification::Zener { voltage, .. } => {
                Some(*voltage)
            }
            _ => None,
        }
    }
}

/// Stateless classifier over fixed calibration constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Classifier {
    front_end: FrontEndConfig,
    thresholds: ThresholdConfig,
}

impl Classifier {
    /// Create a new classifier
    pub const fn new(front_end: FrontEndConfig, thresholds: ThresholdConfig) -> Self {
        Self {
            front_end,
            thresholds,
        }
    }

    /// Classify the magnitudes of one scan (ADC counts)
    pub fn classify(&self, forward: u16, reverse: u16) -> Classification {
        self.classify_voltages(
            VoltageReading::from_counts(forward, &self.front_end),
            VoltageReading::from_counts(reverse, &self.front_end),
        )
    }

    /// Classify a scanner result
    pub fn classify_scan(&self, magnitudes: DirectionalMagnitudes) -> Classification {
        self.classify(magnitudes.forward, magnitudes.reverse)
    }

    /// Classify already-converted voltages
    pub fn classify_voltages(
        &self,
        forward: VoltageReading,
        reverse: VoltageReading,
    ) -> Classification {
        let open = self.thresholds.open_dv as u32;
        let short = self.thresholds.short_dv as u32;
        let (fwd_dv, rev_dv) = (forward.tenths(), reverse.tenths());

        if fwd_dv >= open && rev_dv >= open {
            return Classification::Open;
        }

        if fwd_dv <= short && rev_dv <= short {
            return Classification::Short;
        }

        // Full-precision comparison; a tie resolves to reverse
        let (direction, voltage) = if forward > reverse {
            (Direction::Forward, forward)
        } else {
            (Direction::Reverse, reverse)
        };

        if voltage.tenths() >= open {
            Classification::Diode { direction, voltage }
        } else {
            Classification::Zener { direction, voltage }
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(FrontEndConfig::reference(), ThresholdConfig::reference())
    }
}
