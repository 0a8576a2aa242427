//! RP2040 analog front end
//!
//! The probe terminals reach ADC0 (GPIO26) and ADC1 (GPIO27) through the
//! input dividers. The RP2040 ADC has no separate start/done handshake
//! exposed by the HAL, so the conversion runs on `start_conversion` and the
//! result is handed out on the next poll.

use defmt::*;
use embassy_rp::adc::{Adc, Blocking, Channel};

use zenertest_core::traits::{AnalogFrontEnd, ProbeChannel};

/// ADC front end wired to both probe terminals
pub struct Rp2040FrontEnd<'d> {
    adc: Adc<'d, Blocking>,
    terminal_a: Channel<'d>,
    terminal_b: Channel<'d>,
    selected: ProbeChannel,
    result: Option<u16>,
}

impl<'d> Rp2040FrontEnd<'d> {
    /// Create the front end
    ///
    /// # Arguments
    /// - `adc`: Blocking ADC driver
    /// - `terminal_a`: Channel on the red probe divider
    /// - `terminal_b`: Channel on the black probe divider
    pub fn new(adc: Adc<'d, Blocking>, terminal_a: Channel<'d>, terminal_b: Channel<'d>) -> Self {
        Self {
            adc,
            terminal_a,
            terminal_b,
            selected: ProbeChannel::TerminalA,
            result: None,
        }
    }
}

impl AnalogFrontEnd for Rp2040FrontEnd<'_> {
    fn select_channel(&mut self, channel: ProbeChannel) {
        self.selected = channel;
        self.result = None;
    }

    fn start_conversion(&mut self) {
        let channel = match self.selected {
            ProbeChannel::TerminalA => &mut self.terminal_a,
            ProbeChannel::TerminalB => &mut self.terminal_b,
        };

        // A failed conversion never completes; the sampler times out
        self.result = match self.adc.blocking_read(channel) {
            Ok(count) => Some(count),
            Err(e) => {
                warn!("ADC conversion failed on {}: {}", self.selected, e);
                None
            }
        };
    }

    fn poll_conversion(&mut self) -> Option<u16> {
        self.result.take()
    }
}
