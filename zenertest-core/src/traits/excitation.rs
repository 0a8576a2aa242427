//! Excitation output trait

/// Which way the test current is driven through the component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Terminal A driven positive
    Forward,
    /// Terminal B driven positive
    Reverse,
}

impl Polarity {
    /// Both polarities in scan order
    pub const SCAN_ORDER: [Polarity; 2] = [Polarity::Forward, Polarity::Reverse];
}

/// Trait for the two mutually exclusive excitation lines
///
/// At most one line is ever asserted. `release` returns both to the
/// neutral (off) state.
pub trait Excitation {
    /// Assert the line for `polarity` and de-assert the other
    fn drive(&mut self, polarity: Polarity);

    /// De-assert both lines
    fn release(&mut self);

    /// Currently driven polarity, `None` when neutral
    fn active(&self) -> Option<Polarity>;
}
