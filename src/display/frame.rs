//! Scoped drawing frame.
//!
//! A [`Frame`] borrows its surface mutably for as long as it is open, so two frames can never be
//! open on the same display at once. Calling [`Frame::commit`] pushes the canvas to the surface
//! and reports the result; a frame dropped without it (an early `?` return while drawing)
//! commits from `Drop`, logging any failure since there is no caller left to receive it.

use crate::display::canvas::{Canvas, TextRun};
use crate::display::style::TextStyle;
use crate::display::surface::DisplaySurface;
use crate::error::{AmpviewError, Result};
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

pub struct Frame<'a, S: DisplaySurface + ?Sized> {
    surface: &'a mut S,
    canvas: Canvas,
    committed: bool,
}

impl<'a, S: DisplaySurface + ?Sized> Frame<'a, S> {
    /// Open a blank frame covering the whole surface.
    pub fn acquire(surface: &'a mut S, style: &TextStyle) -> Self {
        let canvas = Canvas::new(surface.size(), style.background);
        Self {
            surface,
            canvas,
            committed: false,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Draw one line of text with its top-left corner at `position`.
    ///
    /// The anchor has to lie on the surface; glyphs running past the right or bottom edge are
    /// clipped.
    pub fn draw_text(&mut self, position: Point, text: &str, style: &TextStyle) -> Result<()> {
        if !self.canvas.bounding_box().contains(position) {
            return Err(AmpviewError::render(format!(
                "text anchor ({}, {}) lies outside the {}x{} surface",
                position.x,
                position.y,
                self.canvas.width(),
                self.canvas.height()
            )));
        }

        Text::with_baseline(text, position, style.character_style(), Baseline::Top)
            .draw(&mut self.canvas)
            .map_err(|never| -> AmpviewError { match never {} })?;
        self.canvas.record_text(TextRun {
            position,
            text: text.to_string(),
        });
        Ok(())
    }

    /// Push the frame to the display.
    pub fn commit(mut self) -> Result<()> {
        self.committed = true;
        self.surface.commit(&self.canvas)
    }
}

impl<S: DisplaySurface + ?Sized> Drop for Frame<'_, S> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        self.committed = true;
        if let Err(err) = self.surface.commit(&self.canvas) {
            log::error!("Committing abandoned frame failed: {err}");
        }
    }
}
