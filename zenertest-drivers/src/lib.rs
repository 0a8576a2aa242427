//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in zenertest-core on top of `embedded-hal` pins and delays:
//!
//! - Excitation lines (two GPIO outputs)
//! - HD44780 character LCD (4-bit bus, custom glyphs)
//! - Scan button (edge-triggered GPIO input)

#![no_std]
#![deny(unsafe_code)]

pub mod button;
pub mod excitation;
pub mod lcd;

pub use button::ScanButton;
pub use excitation::GpioExcitation;
pub use lcd::Hd44780;
