//! Dual-polarity scanner
//!
//! Drives the component in both directions and reduces each direction to
//! the smoothed voltage difference between the two probe terminals.

use embedded_hal::delay::DelayNs;

use super::{MeasureError, Sampler};
use crate::config::ScanTiming;
use crate::traits::{AnalogFrontEnd, Excitation, Polarity, ProbeChannel};

/// Exponential smoothing filter
///
/// Each update weighs the new sample 50% against the accumulated value:
/// `avg = (avg + sample) / 2`, integer division. Later samples dominate;
/// this is not an arithmetic mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExponentialAverage(u16);

impl ExponentialAverage {
    /// Start the filter at the first sample
    pub const fn seed(sample: u16) -> Self {
        Self(sample)
    }

    /// Fold in one sample
    pub fn update(&mut self, sample: u16) {
        self.0 = ((self.0 as u32 + sample as u32) / 2) as u16;
    }

    /// Current filter output
    pub const fn value(self) -> u16 {
        self.0
    }
}

/// Smoothed readings of both terminals under one polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TerminalPair {
    pub a: u16,
    pub b: u16,
}

impl TerminalPair {
    /// Absolute differential across the component
    pub const fn magnitude(&self) -> u16 {
        self.a.abs_diff(self.b)
    }
}

/// One magnitude per excitation polarity, in ADC counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DirectionalMagnitudes {
    pub forward: u16,
    pub reverse: u16,
}

/// Dual-polarity scanner
///
/// Exclusively owns the sampler (front end + delay) and the excitation
/// lines for the lifetime of the measurement engine.
pub struct Scanner<A, E, D> {
    sampler: Sampler<A, D>,
    excitation: E,
    settle_ms: u32,
    inter_sample_us: u32,
    smoothing_passes: u8,
}

impl<A, E, D> Scanner<A, E, D>
where
    A: AnalogFrontEnd,
    E: Excitation,
    D: DelayNs,
{
    /// Create a new scanner
    ///
    /// The excitation lines are released immediately so the component
    /// starts unpowered.
    pub fn new(sampler: Sampler<A, D>, mut excitation: E, timing: &ScanTiming) -> Self {
        excitation.release();
        Self {
            sampler,
            excitation,
            settle_ms: timing.settle_ms,
            inter_sample_us: timing.inter_sample_us,
            smoothing_passes: timing.smoothing_passes,
        }
    }

    /// Measure the component in both polarities
    ///
    /// Returns the forward and reverse magnitudes. Excitation is neutral
    /// when this returns, whether or not a conversion timed out.
    pub fn scan_component(&mut self) -> Result<DirectionalMagnitudes, MeasureError> {
        let forward = self.scan_polarity(Polarity::Forward)?;
        let reverse = self.scan_polarity(Polarity::Reverse)?;

        Ok(DirectionalMagnitudes { forward, reverse })
    }

    /// Measure one polarity and return its magnitude
    pub fn scan_polarity(&mut self, polarity: Polarity) -> Result<u16, MeasureError> {
        self.excitation.drive(polarity);
        self.sampler.delay().delay_ms(self.settle_ms);

        let pair = self.sample_pair();
        self.excitation.release();

        Ok(pair?.magnitude())
    }

    /// Sample both terminals with exponential smoothing
    fn sample_pair(&mut self) -> Result<TerminalPair, MeasureError> {
        let mut a = ExponentialAverage::seed(self.sample_settled(ProbeChannel::TerminalA)?);
        let mut b = ExponentialAverage::seed(self.sample_settled(ProbeChannel::TerminalB)?);

        for _ in 0..self.smoothing_passes {
            a.update(self.sample_settled(ProbeChannel::TerminalA)?);
            b.update(self.sample_settled(ProbeChannel::TerminalB)?);
        }

        Ok(TerminalPair {
            a: a.value(),
            b: b.value(),
        })
    }

    /// One conversion followed by the mux settle wait
    fn sample_settled(&mut self, channel: ProbeChannel) -> Result<u16, MeasureError> {
        let sample = self.sampler.sample(channel)?;
        self.sampler.delay().delay_us(self.inter_sample_us);
        Ok(sample.count())
    }

    /// Excitation state, for diagnostics
    pub fn excitation(&self) -> &E {
        &self.excitation
    }

    /// Release the hardware
    pub fn into_parts(self) -> (A, E, D) {
        let (adc, delay) = self.sampler.into_parts();
        (adc, self.excitation, delay)
    }
}
