//! Analog front end trait

/// Analog input wired to one probe terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProbeChannel {
    /// Terminal A (red probe)
    TerminalA,
    /// Terminal B (black probe)
    TerminalB,
}

impl ProbeChannel {
    /// ADC channel index on the reference board
    pub const fn index(self) -> u8 {
        match self {
            ProbeChannel::TerminalA => 0,
            ProbeChannel::TerminalB => 1,
        }
    }
}

/// Trait for the analog-to-digital converter feeding the probes
///
/// Mirrors a successive-approximation ADC: select an input, start a
/// conversion, then poll until the hardware reports completion. The
/// sampler owns the waiting, so implementations never block.
pub trait AnalogFrontEnd {
    /// Route the given probe terminal to the converter input
    fn select_channel(&mut self, channel: ProbeChannel);

    /// Start a conversion on the selected channel
    fn start_conversion(&mut self);

    /// Poll for the conversion result
    ///
    /// Returns `Some(count)` once the conversion has completed, `None`
    /// while it is still in progress (or the hardware never finishes).
    fn poll_conversion(&mut self) -> Option<u16>;
}
