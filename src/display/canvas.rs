//! In-memory pixel buffer backing a frame.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use std::convert::Infallible;

/// A line of text drawn onto a canvas, kept alongside the pixels so headless backends and tests
/// can see what a frame says without rasterising it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub position: Point,
    pub text: String,
}

/// Full-surface RGB565 framebuffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    size: Size,
    pixels: Vec<Rgb565>,
    texts: Vec<TextRun>,
}

impl Canvas {
    /// Blank canvas filled with `background`.
    pub fn new(size: Size, background: Rgb565) -> Self {
        let len = size.width as usize * size.height as usize;
        Self {
            size,
            pixels: vec![background; len],
            texts: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        self.index(point).map(|idx| self.pixels[idx])
    }

    pub fn pixels(&self) -> &[Rgb565] {
        &self.pixels
    }

    /// Pixel rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb565]> {
        self.pixels.chunks(self.size.width.max(1) as usize)
    }

    pub fn texts(&self) -> &[TextRun] {
        &self.texts
    }

    /// All text runs joined with `" | "`, or `None` for a frame without text.
    pub fn text_summary(&self) -> Option<String> {
        if self.texts.is_empty() {
            return None;
        }
        let parts: Vec<&str> = self.texts.iter().map(|run| run.text.as_str()).collect();
        Some(parts.join(" | "))
    }

    pub(crate) fn record_text(&mut self, run: TextRun) {
        self.texts.push(run);
    }

    fn index(&self, point: Point) -> Option<usize> {
        let (x, y) = (u32::try_from(point.x).ok()?, u32::try_from(point.y).ok()?);
        if x < self.size.width && y < self.size.height {
            Some(y as usize * self.size.width as usize + x as usize)
        } else {
            None
        }
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        // Pixels outside the surface are dropped; the device clips the same way.
        for Pixel(point, color) in pixels {
            if let Some(idx) = self.index(point) {
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }
}
