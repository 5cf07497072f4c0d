//! Headless surface that reports each frame through the logger.

use crate::display::canvas::Canvas;
use crate::display::surface::DisplaySurface;
use crate::error::Result;
use embedded_graphics::geometry::Size;

/// Logs the text of every committed frame at info level.
pub struct LogPanel {
    size: Size,
    frames: u64,
}

impl LogPanel {
    pub fn new(size: Size) -> Self {
        Self { size, frames: 0 }
    }

    pub fn frames_committed(&self) -> u64 {
        self.frames
    }
}

impl DisplaySurface for LogPanel {
    fn initialize(&mut self) -> Result<()> {
        log::info!(
            "Log panel ready ({}x{} px)",
            self.size.width,
            self.size.height
        );
        Ok(())
    }

    fn size(&self) -> Size {
        self.size
    }

    fn commit(&mut self, canvas: &Canvas) -> Result<()> {
        self.frames += 1;
        match canvas.text_summary() {
            Some(text) => log::info!("frame {}: {}", self.frames, text),
            None => log::info!("frame {}: <blank>", self.frames),
        }
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        log::debug!("Log panel closed after {} frames", self.frames);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_graphics::prelude::*;

    #[test]
    fn test_counts_commits() {
        let mut panel = LogPanel::new(Size::new(128, 128));
        panel.initialize().unwrap();
        let canvas = Canvas::new(panel.size(), Rgb565::BLACK);
        panel.commit(&canvas).unwrap();
        panel.commit(&canvas).unwrap();
        assert_eq!(panel.frames_committed(), 2);
        panel.cleanup().unwrap();
    }
}
