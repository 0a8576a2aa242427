//! Scan button
//!
//! A GPIO input polled by the service loop. A scan is requested once per
//! press, on the rising edge of the (optionally inverted) level.

use core::convert::Infallible;

use embedded_hal::digital::InputPin;
use zenertest_core::trigger::EdgeDetector;

/// Edge-triggered scan button
pub struct ScanButton<P> {
    pin: P,
    /// If true, pressed = pin LOW
    inverted: bool,
    edge: EdgeDetector,
}

impl<P: InputPin<Error = Infallible>> ScanButton<P> {
    /// Create a new scan button
    ///
    /// Samples the pin once so a button already held at boot does not
    /// count as a press.
    ///
    /// # Arguments
    /// - `pin`: The GPIO input
    /// - `inverted`: If true, the button is pressed when the pin is LOW
    pub fn new(mut pin: P, inverted: bool) -> Self {
        let pressed = read_level(&mut pin) != inverted;
        Self {
            pin,
            inverted,
            edge: EdgeDetector::new(pressed),
        }
    }

    /// Create a button that pulls the pin high when pressed
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create a button that pulls the pin low when pressed
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Sample the pin, returns true when a scan was requested
    pub fn poll(&mut self) -> bool {
        let pressed = read_level(&mut self.pin) != self.inverted;
        self.edge.update(pressed)
    }

    /// Whether the button was pressed at the last poll
    pub fn is_pressed(&self) -> bool {
        self.edge.level()
    }
}

fn read_level<P: InputPin<Error = Infallible>>(pin: &mut P) -> bool {
    match pin.is_high() {
        Ok(level) => level,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use embedded_hal::digital::ErrorType;

    /// Mock input whose level the test controls
    struct MockInput<'a> {
        level: &'a Cell<bool>,
    }

    impl ErrorType for MockInput<'_> {
        type Error = Infallible;
    }

    impl InputPin for MockInput<'_> {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.level.get())
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.level.get())
        }
    }

    #[test]
    fn test_active_high_press() {
        let level = Cell::new(false);
        let mut button = ScanButton::new_active_high(MockInput { level: &level });

        assert!(!button.poll());
        level.set(true);
        assert!(button.poll());
        assert!(button.is_pressed());
        assert!(!button.poll());
        level.set(false);
        assert!(!button.poll());
    }

    #[test]
    fn test_active_low_press() {
        let level = Cell::new(true);
        let mut button = ScanButton::new_active_low(MockInput { level: &level });

        assert!(!button.poll());
        level.set(false);
        assert!(button.poll());
        assert!(!button.poll());
    }

    #[test]
    fn test_held_at_boot() {
        let level = Cell::new(true);
        let mut button = ScanButton::new_active_high(MockInput { level: &level });

        assert!(button.is_pressed());
        assert!(!button.poll());
        level.set(false);
        assert!(!button.poll());
        level.set(true);
        assert!(button.poll());
    }
}
