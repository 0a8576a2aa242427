//! Board-agnostic core logic for the diode / zener tester
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (analog front end, excitation, display)
//! - Analog sampler with bounded conversion wait
//! - Dual-polarity scanner with exponential smoothing
//! - Classifier (open / short / diode / zener) and voltage conversion
//! - Screen rendering and custom glyph definitions
//! - Trigger edge detection and the measurement cycle
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod measure;
pub mod tester;
pub mod traits;
pub mod trigger;
pub mod ui;

pub use measure::{Classification, Direction, MeasureError, VoltageReading};
pub use tester::Tester;
