//! Sample renderer.
//!
//! Every sample is a full repaint: a blank frame, one line of text at a fixed anchor, commit.

use crate::display::{DisplaySurface, Frame, Point, TextStyle};
use crate::error::Result;
use crate::sample::{format_current, Sample};

/// Top-left anchor of the readout, in pixels.
pub const DEFAULT_ANCHOR: Point = Point::new(3, 3);

/// Owns the display for the life of the process and draws each sample onto it.
pub struct SampleRenderer {
    surface: Box<dyn DisplaySurface>,
    style: TextStyle,
    anchor: Point,
    frames_rendered: u64,
}

impl SampleRenderer {
    pub fn new(surface: Box<dyn DisplaySurface>, style: TextStyle) -> Self {
        Self::with_anchor(surface, style, DEFAULT_ANCHOR)
    }

    pub fn with_anchor(surface: Box<dyn DisplaySurface>, style: TextStyle, anchor: Point) -> Self {
        Self {
            surface,
            style,
            anchor,
            frames_rendered: 0,
        }
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.surface.initialize()
    }

    /// Replace whatever the display shows with `sample`.
    ///
    /// The frame reaches the display exactly once, including when drawing fails; the drawing
    /// error is still returned.
    pub fn render(&mut self, sample: Sample) -> Result<()> {
        let text = format_current(sample);
        log::trace!("Rendering {} A as {text}", sample.amps());

        let mut frame = Frame::acquire(self.surface.as_mut(), &self.style);
        frame.draw_text(self.anchor, &text, &self.style)?;
        frame.commit()?;
        self.frames_rendered += 1;
        Ok(())
    }

    /// Release the display. The last frame is left on screen.
    pub fn cleanup(&mut self) -> Result<()> {
        self.surface.cleanup()
    }

    /// Samples that reached the display in full.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }
}
