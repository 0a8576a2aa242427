//! Result screen rendering
//!
//! The display is a 16x2 character LCD:
//!
//! ```text
//! Zener 5.9 V
//! R o---->Z----o B
//! ```
//!
//! Row 0 carries the label and voltage, row 1 draws the component between
//! the red (R) and black (B) probe points.

use crate::measure::{Classification, Direction, MeasureError};
use crate::traits::{DisplayError, DisplaySink};

use super::Glyph;

/// Characters per row
pub const SCREEN_COLS: u8 = 16;

/// Label and voltage row
const ROW_LABEL: u8 = 0;

/// Probe diagram row
const ROW_DIAGRAM: u8 = 1;

/// Wire segments either side of the component symbol
const LEAD_LEN: u8 = 4;

/// Wire segments for a short (two leads plus the symbol width)
const SHORT_LEN: u8 = 2 * LEAD_LEN + 2;

/// Result of one measurement cycle
pub type Outcome = Result<Classification, MeasureError>;

/// Render either a classification or a measurement failure
pub fn render<S: DisplaySink>(outcome: &Outcome, sink: &mut S) -> Result<(), DisplayError> {
    match outcome {
        Ok(classification) => render_classification(classification, sink),
        Err(_) => render_failure(sink),
    }
}

/// Render a classification
///
/// Expects a cleared screen.
pub fn render_classification<S: DisplaySink>(
    classification: &Classification,
    sink: &mut S,
) -> Result<(), DisplayError> {
    sink.set_cursor(0, ROW_LABEL)?;

    match classification {
        Classification::Open => {
            sink.show_text(" Connect Zener", 14)?;
        }
        Classification::Short => {
            sink.show_text(" Short Circuit", 14)?;
            draw_probes(sink, |sink| sink.repeat_glyph(Glyph::Wire, SHORT_LEN))?;
        }
        Classification::Diode { direction, voltage }
        | Classification::Zener { direction, voltage } => {
            let is_zener = matches!(classification, Classification::Zener { .. });

            sink.show_text(if is_zener { "Zener " } else { "Diode " }, 6)?;
            sink.show_text(&voltage.to_text(), 10)?;

            let symbol = component_symbol(*direction, is_zener);
            draw_probes(sink, |sink| {
                sink.repeat_glyph(Glyph::Wire, LEAD_LEN)?;
                sink.show_glyph(symbol[0])?;
                sink.show_glyph(symbol[1])?;
                sink.repeat_glyph(Glyph::Wire, LEAD_LEN)
            })?;
        }
    }

    Ok(())
}

/// Render the measurement-failed screen
///
/// Expects a cleared screen. The cause is not shown; the next press retries.
pub fn render_failure<S: DisplaySink>(sink: &mut S) -> Result<(), DisplayError> {
    sink.set_cursor(0, ROW_LABEL)?;
    sink.show_text(" Measure Failed", 15)?;
    sink.set_cursor(0, ROW_DIAGRAM)?;
    sink.show_text(" Press to retry", 15)
}

/// Clear the screen and show a single status line
pub fn render_message<S: DisplaySink>(text: &str, sink: &mut S) -> Result<(), DisplayError> {
    sink.clear()?;
    sink.set_cursor(0, ROW_LABEL)?;
    sink.show_text(text, SCREEN_COLS as usize)
}

/// Symbol pair for the component, arrow on the anode side
fn component_symbol(direction: Direction, is_zener: bool) -> [Glyph; 2] {
    match (direction, is_zener) {
        (Direction::Forward, false) => [Glyph::ArrowForward, Glyph::DiodeForward],
        (Direction::Forward, true) => [Glyph::ArrowForward, Glyph::ZenerForward],
        (Direction::Reverse, false) => [Glyph::DiodeReverse, Glyph::ArrowReverse],
        (Direction::Reverse, true) => [Glyph::ZenerReverse, Glyph::ArrowReverse],
    }
}

/// Draw "R o ... o B" with `between` filling the middle
fn draw_probes<S, F>(sink: &mut S, between: F) -> Result<(), DisplayError>
where
    S: DisplaySink,
    F: FnOnce(&mut S) -> Result<(), DisplayError>,
{
    sink.set_cursor(0, ROW_DIAGRAM)?;
    sink.show_text("R ", 2)?;
    sink.show_glyph(Glyph::Point)?;
    between(sink)?;
    sink.show_glyph(Glyph::Point)?;
    sink.show_text(" B", 2)
}
