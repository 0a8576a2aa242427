//! Measurement pipeline
//!
//! Control flows strictly sampler → scanner → classifier:
//!
//! - [`Sampler`] produces one raw conversion per call
//! - [`Scanner`] drives both excitation polarities and smooths the samples
//!   into one magnitude per direction
//! - [`Classifier`] converts magnitudes to volts and decides what is
//!   bridging the probes

use core::fmt;

use crate::traits::ProbeChannel;

pub mod classifier;
pub mod sampler;
pub mod scanner;
pub mod voltage;

pub use classifier::{Classification, Classifier, Direction};
pub use sampler::{RawSample, Sampler};
pub use scanner::{DirectionalMagnitudes, ExponentialAverage, Scanner, TerminalPair};
pub use voltage::{adc_to_microvolts, VoltageReading};

/// Errors that abort a measurement cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeasureError {
    /// The converter never signalled completion
    ConversionTimeout {
        /// Channel being converted when the wait gave up
        channel: ProbeChannel,
    },
}

impl fmt::Display for MeasureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasureError::ConversionTimeout { channel } => {
                write!(f, "ADC conversion timed out on {:?}", channel)
            }
        }
    }
}
