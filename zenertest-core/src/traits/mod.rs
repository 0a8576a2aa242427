//! Hardware abstraction traits
//!
//! These traits define the interface between the measurement logic
//! and hardware-specific implementations.

pub mod analog;
pub mod display;
pub mod excitation;

pub use analog::{AnalogFrontEnd, ProbeChannel};
pub use display::{DisplayError, DisplaySink};
pub use excitation::{Excitation, Polarity};
