//! Board configuration
//!
//! Generated by build.rs from tester.toml.

use zenertest_core::config::{FrontEndConfig, ScanTiming, TesterConfig, ThresholdConfig, UiTiming};

include!(concat!(env!("OUT_DIR"), "/tester_config.rs"));
