//! Analog sampler
//!
//! Single conversions on one probe channel with a bounded completion wait.

use embedded_hal::delay::DelayNs;

use super::MeasureError;
use crate::config::{FrontEndConfig, ScanTiming};
use crate::traits::{AnalogFrontEnd, ProbeChannel};

/// One ADC conversion result, in `0..=adc_max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample(u16);

impl RawSample {
    /// Wrap a count, clamping it to the converter range
    pub const fn new(count: u16, adc_max: u16) -> Self {
        if count > adc_max {
            Self(adc_max)
        } else {
            Self(count)
        }
    }

    /// Raw ADC count
    pub const fn count(self) -> u16 {
        self.0
    }
}

/// Analog sampler
///
/// Owns the front end and the delay provider. Every wait is a blocking
/// busy-wait: the analog path needs the exact settle times.
pub struct Sampler<A, D> {
    adc: A,
    delay: D,
    adc_max: u16,
    acquisition_ms: u32,
    poll_us: u32,
    poll_limit: u32,
}

impl<A, D> Sampler<A, D>
where
    A: AnalogFrontEnd,
    D: DelayNs,
{
    /// Create a new sampler
    ///
    /// # Arguments
    /// - `adc`: Front end wired to both probe terminals
    /// - `delay`: Blocking delay provider
    /// - `front_end`: Converter range
    /// - `timing`: Acquisition and completion-poll timing
    pub fn new(adc: A, delay: D, front_end: &FrontEndConfig, timing: &ScanTiming) -> Self {
        Self {
            adc,
            delay,
            adc_max: front_end.adc_max,
            acquisition_ms: timing.acquisition_ms,
            poll_us: timing.conversion_poll_us,
            poll_limit: timing.conversion_poll_limit,
        }
    }

    /// Convert one channel
    ///
    /// Selects the channel, waits the acquisition time, starts the
    /// conversion and polls for completion. Gives up with
    /// [`MeasureError::ConversionTimeout`] after `conversion_poll_limit`
    /// unsuccessful polls.
    pub fn sample(&mut self, channel: ProbeChannel) -> Result<RawSample, MeasureError> {
        self.adc.select_channel(channel);
        self.delay.delay_ms(self.acquisition_ms);
        self.adc.start_conversion();

        for _ in 0..self.poll_limit {
            if let Some(count) = self.adc.poll_conversion() {
                return Ok(RawSample::new(count, self.adc_max));
            }
            self.delay.delay_us(self.poll_us);
        }

        Err(MeasureError::ConversionTimeout { channel })
    }

    /// Blocking delay shared with the scanner
    pub fn delay(&mut self) -> &mut D {
        &mut self.delay
    }

    /// Release the front end and delay provider
    pub fn into_parts(self) -> (A, D) {
        (self.adc, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Front end that completes after a fixed number of polls
    struct SlowAdc {
        selected: Option<ProbeChannel>,
        started: bool,
        polls_needed: u32,
        polls: u32,
        value: u16,
    }

    impl SlowAdc {
        fn new(polls_needed: u32, value: u16) -> Self {
            Self {
                selected: None,
                started: false,
                polls_needed,
                polls: 0,
                value,
            }
        }
    }

    impl AnalogFrontEnd for SlowAdc {
        fn select_channel(&mut self, channel: ProbeChannel) {
            self.selected = Some(channel);
        }

        fn start_conversion(&mut self) {
            self.started = true;
            self.polls = 0;
        }

        fn poll_conversion(&mut self) -> Option<u16> {
            if !self.started {
                return None;
            }
            self.polls += 1;
            if self.polls >= self.polls_needed {
                self.started = false;
                Some(self.value)
            } else {
                None
            }
        }
    }

    /// Delay that only accumulates requested time
    #[derive(Default)]
    struct CountingDelay {
        total_ns: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }

    fn sampler(adc: SlowAdc) -> Sampler<SlowAdc, CountingDelay> {
        Sampler::new(
            adc,
            CountingDelay::default(),
            &FrontEndConfig::reference(),
            &ScanTiming::reference(),
        )
    }

    #[test]
    fn test_sample_returns_conversion() {
        let mut sampler = sampler(SlowAdc::new(3, 512));

        let sample = sampler.sample(ProbeChannel::TerminalB).unwrap();
        assert_eq!(sample.count(), 512);

        let (adc, _) = sampler.into_parts();
        assert_eq!(adc.selected, Some(ProbeChannel::TerminalB));
    }

    #[test]
    fn test_sample_waits_acquisition_time() {
        let mut sampler = sampler(SlowAdc::new(1, 100));
        sampler.sample(ProbeChannel::TerminalA).unwrap();

        let (_, delay) = sampler.into_parts();
        // 2 ms acquisition, no poll wait when the first poll completes
        assert_eq!(delay.total_ns, 2_000_000);
    }

    #[test]
    fn test_sample_clamps_to_adc_max() {
        let mut sampler = sampler(SlowAdc::new(1, 4000));
        let sample = sampler.sample(ProbeChannel::TerminalA).unwrap();
        assert_eq!(sample.count(), 1023);
    }

    #[test]
    fn test_conversion_timeout() {
        // Needs more polls than the reference limit of 100
        let mut sampler = sampler(SlowAdc::new(101, 100));

        let result = sampler.sample(ProbeChannel::TerminalA);
        assert_eq!(
            result,
            Err(MeasureError::ConversionTimeout {
                channel: ProbeChannel::TerminalA
            })
        );
    }

    #[test]
    fn test_completes_on_last_poll() {
        let mut sampler = sampler(SlowAdc::new(100, 7));
        assert_eq!(sampler.sample(ProbeChannel::TerminalA).unwrap().count(), 7);
    }
}
