//! Configuration types
//!
//! Board-agnostic tester configuration. The firmware fixes these values at
//! build time from `tester.toml`.

pub mod types;

pub use types::*;
