//! Measurement cycle
//!
//! One cycle: clear the display, scan both polarities, classify, render.
//! Nothing is carried from one cycle to the next; after a failure the next
//! trigger simply runs a fresh cycle.

use core::fmt;

use embedded_hal::delay::DelayNs;

use crate::config::TesterConfig;
use crate::measure::{Classification, Classifier, MeasureError, Sampler, Scanner};
use crate::traits::{AnalogFrontEnd, DisplayError, DisplaySink, Excitation};
use crate::ui::{self, Outcome};

/// Errors that end a measurement cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleError {
    /// The scan was aborted; the failure screen is showing
    Measure(MeasureError),
    /// The display rejected a write
    Display(DisplayError),
}

impl From<MeasureError> for CycleError {
    fn from(e: MeasureError) -> Self {
        CycleError::Measure(e)
    }
}

impl From<DisplayError> for CycleError {
    fn from(e: DisplayError) -> Self {
        CycleError::Display(e)
    }
}

impl fmt::Display for CycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleError::Measure(e) => write!(f, "measurement failed: {}", e),
            CycleError::Display(e) => write!(f, "display failed: {}", e),
        }
    }
}

/// Measurement engine: scanner plus classifier
pub struct Tester<A, E, D> {
    scanner: Scanner<A, E, D>,
    classifier: Classifier,
}

impl<A, E, D> Tester<A, E, D>
where
    A: AnalogFrontEnd,
    E: Excitation,
    D: DelayNs,
{
    /// Assemble the engine from the probe hardware
    ///
    /// # Arguments
    /// - `adc`: Front end wired to both probe terminals
    /// - `excitation`: Forward/reverse drive lines
    /// - `delay`: Blocking delay used for all settle times
    /// - `config`: Calibration, thresholds and timing
    pub fn new(adc: A, excitation: E, delay: D, config: &TesterConfig) -> Self {
        let sampler = Sampler::new(adc, delay, &config.front_end, &config.scan);
        Self {
            scanner: Scanner::new(sampler, excitation, &config.scan),
            classifier: Classifier::new(config.front_end, config.thresholds),
        }
    }

    /// Scan and classify without touching the display
    pub fn measure(&mut self) -> Outcome {
        let magnitudes = self.scanner.scan_component()?;
        Ok(self.classifier.classify_scan(magnitudes))
    }

    /// Run one full scan-classify-display cycle
    ///
    /// On a conversion timeout the failure screen is rendered and the
    /// measurement error returned.
    pub fn run_cycle<S: DisplaySink>(&mut self, sink: &mut S) -> Result<Classification, CycleError> {
        sink.clear()?;

        let outcome = self.measure();
        ui::render(&outcome, sink)?;

        Ok(outcome?)
    }

    /// The scanner, for diagnostics
    pub fn scanner(&self) -> &Scanner<A, E, D> {
        &self.scanner
    }

    /// Release the hardware
    pub fn into_parts(self) -> (A, E, D) {
        self.scanner.into_parts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::Direction;
    use crate::traits::{Polarity, ProbeChannel};
    use crate::ui::Glyph;

    /// Component model: fixed terminal readings per polarity
    struct FakeProbe {
        forward: (u16, u16),
        reverse: (u16, u16),
        polarity: Option<Polarity>,
        selected: ProbeChannel,
        dead: bool,
    }

    /// Shared handle so both trait impls see the same probe state
    struct ProbeAdc<'a>(&'a core::cell::RefCell<FakeProbe>);
    struct ProbeExcitation<'a>(&'a core::cell::RefCell<FakeProbe>);

    impl AnalogFrontEnd for ProbeAdc<'_> {
        fn select_channel(&mut self, channel: ProbeChannel) {
            self.0.borrow_mut().selected = channel;
        }

        fn start_conversion(&mut self) {}

        fn poll_conversion(&mut self) -> Option<u16> {
            let probe = self.0.borrow();
            if probe.dead {
                return None;
            }
            let (a, b) = match probe.polarity {
                Some(Polarity::Forward) => probe.forward,
                Some(Polarity::Reverse) => probe.reverse,
                None => (0, 0),
            };
            Some(match probe.selected {
                ProbeChannel::TerminalA => a,
                ProbeChannel::TerminalB => b,
            })
        }
    }

    impl Excitation for ProbeExcitation<'_> {
        fn drive(&mut self, polarity: Polarity) {
            self.0.borrow_mut().polarity = Some(polarity);
        }

        fn release(&mut self) {
            self.0.borrow_mut().polarity = None;
        }

        fn active(&self) -> Option<Polarity> {
            self.0.borrow().polarity
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    /// Sink that only counts calls
    #[derive(Default)]
    struct CountingSink {
        clears: u32,
        texts: u32,
        glyphs: u32,
    }

    impl DisplaySink for CountingSink {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.clears += 1;
            Ok(())
        }

        fn set_cursor(&mut self, _col: u8, _row: u8) -> Result<(), DisplayError> {
            Ok(())
        }

        fn show_text(&mut self, _text: &str, _max_len: usize) -> Result<(), DisplayError> {
            self.texts += 1;
            Ok(())
        }

        fn show_glyph(&mut self, _glyph: Glyph) -> Result<(), DisplayError> {
            self.glyphs += 1;
            Ok(())
        }
    }

    fn probe(forward: (u16, u16), reverse: (u16, u16)) -> core::cell::RefCell<FakeProbe> {
        core::cell::RefCell::new(FakeProbe {
            forward,
            reverse,
            polarity: None,
            selected: ProbeChannel::TerminalA,
            dead: false,
        })
    }

    fn tester(
        probe: &core::cell::RefCell<FakeProbe>,
    ) -> Tester<ProbeAdc<'_>, ProbeExcitation<'_>, NoDelay> {
        Tester::new(
            ProbeAdc(probe),
            ProbeExcitation(probe),
            NoDelay,
            &TesterConfig::reference(),
        )
    }

    #[test]
    fn test_zener_cycle() {
        // Forward: A at 260, B at 60 -> 200 counts (5.9 V)
        // Reverse: A at 40, B at 20 -> 20 counts (0.6 V)
        let probe = probe((260, 60), (40, 20));
        let mut tester = tester(&probe);
        let mut sink = CountingSink::default();

        let result = tester.run_cycle(&mut sink).unwrap();
        assert!(matches!(
            result,
            Classification::Zener {
                direction: Direction::Forward,
                ..
            }
        ));
        assert_eq!(sink.clears, 1);
        // Point, 4 wire, 2 symbol, 4 wire, point
        assert_eq!(sink.glyphs, 12);
    }

    #[test]
    fn test_open_cycle() {
        let probe = probe((1023, 0), (0, 1023));
        let mut tester = tester(&probe);
        assert_eq!(tester.measure(), Ok(Classification::Open));
    }

    #[test]
    fn test_failed_cycle_renders_failure() {
        let probe = probe((260, 60), (40, 20));
        probe.borrow_mut().dead = true;
        let mut tester = tester(&probe);
        let mut sink = CountingSink::default();

        let result = tester.run_cycle(&mut sink);
        assert_eq!(
            result,
            Err(CycleError::Measure(MeasureError::ConversionTimeout {
                channel: ProbeChannel::TerminalA
            }))
        );
        assert_eq!(probe.borrow().polarity, None);
        assert_eq!(sink.texts, 2);
        assert_eq!(sink.glyphs, 0);
    }

    #[test]
    fn test_retry_after_failure() {
        let probe = probe((260, 60), (40, 20));
        probe.borrow_mut().dead = true;
        let mut tester = tester(&probe);
        let mut sink = CountingSink::default();

        assert!(tester.run_cycle(&mut sink).is_err());

        probe.borrow_mut().dead = false;
        assert!(tester.run_cycle(&mut sink).is_ok());
    }
}
