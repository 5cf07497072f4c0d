//! Display surface trait and the in-memory surface.

use crate::display::canvas::Canvas;
use crate::error::{AmpviewError, Result};
use embedded_graphics::geometry::Size;
use parking_lot::Mutex;
use std::sync::Arc;

/// Device boundary for the readout.
///
/// Implementations own whatever transport reaches the pixels (terminal, log, hardware) and
/// only ever see finished canvases. The core never asks a surface to clear itself: the last
/// committed canvas stays visible after shutdown.
pub trait DisplaySurface: Send {
    /// Prepare the device before the first frame.
    fn initialize(&mut self) -> Result<()>;

    /// Pixel dimensions of the drawable area.
    fn size(&self) -> Size;

    /// Show a complete canvas, replacing everything shown before.
    fn commit(&mut self, canvas: &Canvas) -> Result<()>;

    /// Release the device, leaving the last frame on screen.
    fn cleanup(&mut self) -> Result<()>;
}

/// Shared, cloneable view of every canvas a [`MemorySurface`] received.
#[derive(Debug, Clone, Default)]
pub struct FrameHistory {
    frames: Arc<Mutex<Vec<Canvas>>>,
}

impl FrameHistory {
    pub fn len(&self) -> usize {
        self.frames.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.lock().is_empty()
    }

    pub fn frames(&self) -> Vec<Canvas> {
        self.frames.lock().clone()
    }

    pub fn last(&self) -> Option<Canvas> {
        self.frames.lock().last().cloned()
    }

    /// Text summary of each committed frame, in commit order; blank frames yield `""`.
    pub fn texts(&self) -> Vec<String> {
        self.frames
            .lock()
            .iter()
            .map(|canvas| canvas.text_summary().unwrap_or_default())
            .collect()
    }

    fn push(&self, canvas: Canvas) {
        self.frames.lock().push(canvas);
    }
}

/// Surface that keeps every committed canvas in memory.
///
/// Useful for embedding the pipeline where something else presents the pixels, and for
/// asserting on exactly what reached the display.
pub struct MemorySurface {
    size: Size,
    history: FrameHistory,
    fail_commits: bool,
    initialized: bool,
}

impl MemorySurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            history: FrameHistory::default(),
            fail_commits: false,
            initialized: false,
        }
    }

    /// A surface whose every commit fails, as a disconnected panel would.
    pub fn failing(size: Size) -> Self {
        Self {
            fail_commits: true,
            ..Self::new(size)
        }
    }

    /// Handle that observes commits after the surface has been moved into a renderer.
    pub fn history(&self) -> FrameHistory {
        self.history.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl DisplaySurface for MemorySurface {
    fn initialize(&mut self) -> Result<()> {
        self.initialized = true;
        Ok(())
    }

    fn size(&self) -> Size {
        self.size
    }

    fn commit(&mut self, canvas: &Canvas) -> Result<()> {
        if self.fail_commits {
            return Err(AmpviewError::render("memory surface rejected the frame"));
        }
        self.history.push(canvas.clone());
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        self.initialized = false;
        Ok(())
    }
}
