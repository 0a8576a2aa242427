//! GPIO excitation lines
//!
//! Two outputs switch the test current through the component, one per
//! polarity. Both low is the neutral state.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
use zenertest_core::traits::{Excitation, Polarity};

/// Excitation driven by two GPIO pins
pub struct GpioExcitation<F, R> {
    forward: F,
    reverse: R,
    active: Option<Polarity>,
}

impl<F, R> GpioExcitation<F, R>
where
    F: OutputPin<Error = Infallible>,
    R: OutputPin<Error = Infallible>,
{
    /// Create the excitation driver
    ///
    /// # Arguments
    /// - `forward`: Pin that drives terminal A positive
    /// - `reverse`: Pin that drives terminal B positive
    pub fn new(forward: F, reverse: R) -> Self {
        let mut excitation = Self {
            forward,
            reverse,
            active: None,
        };
        // Ensure the component starts unpowered
        excitation.release();
        excitation
    }
}

impl<F, R> Excitation for GpioExcitation<F, R>
where
    F: OutputPin<Error = Infallible>,
    R: OutputPin<Error = Infallible>,
{
    fn drive(&mut self, polarity: Polarity) {
        // Break before make: never both lines high
        match polarity {
            Polarity::Forward => {
                let _ = self.reverse.set_low();
                let _ = self.forward.set_high();
            }
            Polarity::Reverse => {
                let _ = self.forward.set_low();
                let _ = self.reverse.set_high();
            }
        }
        self.active = Some(polarity);
    }

    fn release(&mut self) {
        let _ = self.forward.set_low();
        let _ = self.reverse.set_low();
        self.active = None;
    }

    fn active(&self) -> Option<Polarity> {
        self.active
    }
}
