//! Screen rendering
//!
//! Builds the two-line result screen and defines the custom glyphs used to
//! draw the component between the probes.

pub mod glyph;
pub mod screen;

pub use glyph::Glyph;
pub use screen::{render, render_classification, render_failure, render_message, Outcome};
